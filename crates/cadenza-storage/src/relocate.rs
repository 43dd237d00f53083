//! Object relocation between storage prefixes.
//!
//! The cleanup function moves finished production output out of its working
//! prefixes: every object under a source prefix is copied to the paired
//! destination prefix (preserving the key suffix) and the original is
//! deleted. Copy and delete are two independent calls with no transaction
//! around them, so a failure between the two leaves the object present at
//! both prefixes (duplicated, never lost). Re-running the relocation
//! converges that state: the copy overwrites in place and the delete of an
//! already-deleted key is a no-op.
//!
//! Concurrent runs over overlapping prefixes are unsafe: two relocations
//! racing on the same key have an undefined final state.

use std::sync::Arc;

use cadenza_core::models::{PairReport, RelocatedObject, RelocationReport, RelocationTask};

use crate::traits::{Storage, StorageResult};

/// Relocates objects between prefixes of a single bucket.
pub struct Relocator {
    store: Arc<dyn Storage>,
}

impl Relocator {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    /// Relocate every object covered by `task`.
    ///
    /// Prefix pairs are processed strictly in task order; objects within a
    /// pair in listing order. Any list/copy/delete failure aborts the whole
    /// task; there is no per-object isolation and no partial-result return.
    pub async fn relocate(&self, task: &RelocationTask) -> StorageResult<RelocationReport> {
        let mut report = RelocationReport::default();

        for pair in task.pairs() {
            tracing::info!(
                source_prefix = %pair.source,
                destination_prefix = %pair.destination,
                "Relocating objects between prefixes"
            );

            let keys = self.store.list(&pair.source).await?;

            if keys.is_empty() {
                tracing::info!(source_prefix = %pair.source, "No objects found");
                report.pairs.push(PairReport {
                    source_prefix: pair.source.clone(),
                    destination_prefix: pair.destination.clone(),
                    relocated: Vec::new(),
                });
                continue;
            }

            let mut relocated = Vec::new();

            for source_key in keys {
                // Directory-marker keys (the prefix itself, or any key
                // ending in the separator) hold no content.
                if source_key.ends_with('/') {
                    continue;
                }

                // First occurrence only: a key whose suffix repeats the
                // prefix text must keep the later occurrence intact.
                let destination_key =
                    source_key.replacen(pair.source.as_str(), pair.destination.as_str(), 1);

                tracing::info!(
                    source_key = %source_key,
                    destination_key = %destination_key,
                    "Copying object"
                );
                self.store.copy(&source_key, &destination_key).await?;

                tracing::info!(source_key = %source_key, "Deleting original");
                self.store.delete(&source_key).await?;

                relocated.push(RelocatedObject {
                    source_key,
                    destination_key,
                });
            }

            tracing::info!(
                source_prefix = %pair.source,
                destination_prefix = %pair.destination,
                relocated = relocated.len(),
                "Prefix pair complete"
            );

            report.pairs.push(PairReport {
                source_prefix: pair.source.clone(),
                destination_prefix: pair.destination.clone(),
                relocated,
            });
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{Storage, StorageError};
    use async_trait::async_trait;
    use cadenza_core::StorageBackend;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// In-memory store. Unlike the filesystem backend it can hold
    /// directory-marker keys, which the relocator must skip.
    #[derive(Default)]
    struct MemoryStorage {
        objects: Mutex<BTreeMap<String, Vec<u8>>>,
    }

    impl MemoryStorage {
        fn with_objects(keys: &[&str]) -> Self {
            let storage = Self::default();
            {
                let mut objects = storage.objects.lock().unwrap();
                for key in keys {
                    objects.insert(key.to_string(), key.as_bytes().to_vec());
                }
            }
            storage
        }

        fn keys(&self) -> Vec<String> {
            self.objects.lock().unwrap().keys().cloned().collect()
        }
    }

    #[async_trait]
    impl Storage for MemoryStorage {
        async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
            Ok(self
                .objects
                .lock()
                .unwrap()
                .keys()
                .filter(|k| k.starts_with(prefix))
                .cloned()
                .collect())
        }

        async fn upload(&self, key: &str, data: Vec<u8>) -> StorageResult<()> {
            self.objects.lock().unwrap().insert(key.to_string(), data);
            Ok(())
        }

        async fn download(&self, key: &str) -> StorageResult<Vec<u8>> {
            self.objects
                .lock()
                .unwrap()
                .get(key)
                .cloned()
                .ok_or_else(|| StorageError::NotFound(key.to_string()))
        }

        async fn copy(&self, from_key: &str, to_key: &str) -> StorageResult<()> {
            let mut objects = self.objects.lock().unwrap();
            let data = objects
                .get(from_key)
                .cloned()
                .ok_or_else(|| StorageError::NotFound(from_key.to_string()))?;
            objects.insert(to_key.to_string(), data);
            Ok(())
        }

        async fn delete(&self, key: &str) -> StorageResult<()> {
            self.objects.lock().unwrap().remove(key);
            Ok(())
        }

        async fn exists(&self, key: &str) -> StorageResult<bool> {
            Ok(self.objects.lock().unwrap().contains_key(key))
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::Local
        }
    }

    /// Wraps a store and fails chosen operations, for exercising the
    /// abort-on-first-failure and retry-convergence paths.
    struct FlakyStorage {
        inner: Arc<dyn Storage>,
        fail_copy_of: Option<String>,
        fail_delete_of: Option<String>,
        fail_list: bool,
    }

    impl FlakyStorage {
        fn new(inner: Arc<dyn Storage>) -> Self {
            Self {
                inner,
                fail_copy_of: None,
                fail_delete_of: None,
                fail_list: false,
            }
        }
    }

    #[async_trait]
    impl Storage for FlakyStorage {
        async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
            if self.fail_list {
                return Err(StorageError::ListFailed("injected".to_string()));
            }
            self.inner.list(prefix).await
        }

        async fn upload(&self, key: &str, data: Vec<u8>) -> StorageResult<()> {
            self.inner.upload(key, data).await
        }

        async fn download(&self, key: &str) -> StorageResult<Vec<u8>> {
            self.inner.download(key).await
        }

        async fn copy(&self, from_key: &str, to_key: &str) -> StorageResult<()> {
            if self.fail_copy_of.as_deref() == Some(from_key) {
                return Err(StorageError::CopyFailed("injected".to_string()));
            }
            self.inner.copy(from_key, to_key).await
        }

        async fn delete(&self, key: &str) -> StorageResult<()> {
            if self.fail_delete_of.as_deref() == Some(key) {
                return Err(StorageError::DeleteFailed("injected".to_string()));
            }
            self.inner.delete(key).await
        }

        async fn exists(&self, key: &str) -> StorageResult<bool> {
            self.inner.exists(key).await
        }

        fn backend_type(&self) -> StorageBackend {
            self.inner.backend_type()
        }
    }

    fn task(pairs: &[(&str, &str)]) -> RelocationTask {
        RelocationTask::from_lists(
            pairs.iter().map(|(s, _)| s.to_string()).collect(),
            pairs.iter().map(|(_, d)| d.to_string()).collect(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn moves_every_object_and_empties_sources() {
        let store = Arc::new(MemoryStorage::with_objects(&[
            "production/mp3/a.mp3",
            "production/mp3/b.mp3",
            "production/wav/a.wav",
        ]));
        let relocator = Relocator::new(store.clone());

        let report = relocator
            .relocate(&task(&[
                ("production/mp3/", "production/mp3-final/"),
                ("production/wav/", "production/wav-final/"),
            ]))
            .await
            .unwrap();

        assert_eq!(report.total_relocated(), 3);
        assert_eq!(
            store.keys(),
            vec![
                "production/mp3-final/a.mp3".to_string(),
                "production/mp3-final/b.mp3".to_string(),
                "production/wav-final/a.wav".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn preserves_key_suffixes_including_nesting() {
        let store = Arc::new(MemoryStorage::with_objects(&[
            "production/sentence/2026-08-07/take1.wav",
        ]));
        let relocator = Relocator::new(store.clone());

        relocator
            .relocate(&task(&[(
                "production/sentence/",
                "production/sentence-final/",
            )]))
            .await
            .unwrap();

        assert_eq!(
            store.keys(),
            vec!["production/sentence-final/2026-08-07/take1.wav".to_string()]
        );
    }

    #[tokio::test]
    async fn directory_markers_are_never_touched() {
        let store = Arc::new(MemoryStorage::with_objects(&["A/1.txt", "A/2.txt", "A/"]));
        let relocator = Relocator::new(store.clone());

        let report = relocator.relocate(&task(&[("A/", "B/")])).await.unwrap();

        assert_eq!(report.total_relocated(), 2);
        assert_eq!(
            store.keys(),
            vec!["A/".to_string(), "B/1.txt".to_string(), "B/2.txt".to_string()]
        );
    }

    #[tokio::test]
    async fn replaces_only_the_first_prefix_occurrence() {
        let store = Arc::new(MemoryStorage::with_objects(&["a/a/file"]));
        let relocator = Relocator::new(store.clone());

        relocator.relocate(&task(&[("a/", "b/")])).await.unwrap();

        assert_eq!(store.keys(), vec!["b/a/file".to_string()]);
    }

    #[tokio::test]
    async fn empty_prefix_is_recorded_and_later_pairs_still_run() {
        let store = Arc::new(MemoryStorage::with_objects(&["wav/1.wav"]));
        let relocator = Relocator::new(store.clone());

        let report = relocator
            .relocate(&task(&[("mp3/", "mp3-final/"), ("wav/", "wav-final/")]))
            .await
            .unwrap();

        assert_eq!(report.pairs.len(), 2);
        assert!(report.pairs[0].relocated.is_empty());
        assert_eq!(report.pairs[1].relocated.len(), 1);
        assert_eq!(store.keys(), vec!["wav-final/1.wav".to_string()]);
    }

    #[tokio::test]
    async fn rerun_after_success_is_a_noop() {
        let store = Arc::new(MemoryStorage::with_objects(&["mp3/1.mp3"]));
        let relocator = Relocator::new(store.clone());
        let task = task(&[("mp3/", "mp3-final/")]);

        relocator.relocate(&task).await.unwrap();
        let second = relocator.relocate(&task).await.unwrap();

        assert!(second.is_empty());
        assert_eq!(store.keys(), vec!["mp3-final/1.mp3".to_string()]);
    }

    #[tokio::test]
    async fn list_failure_aborts_the_task() {
        let inner = Arc::new(MemoryStorage::with_objects(&["mp3/1.mp3"]));
        let mut flaky = FlakyStorage::new(inner.clone());
        flaky.fail_list = true;
        let relocator = Relocator::new(Arc::new(flaky));

        let result = relocator.relocate(&task(&[("mp3/", "mp3-final/")])).await;

        assert!(matches!(result, Err(StorageError::ListFailed(_))));
        assert_eq!(inner.keys(), vec!["mp3/1.mp3".to_string()]);
    }

    #[tokio::test]
    async fn copy_failure_aborts_without_losing_objects() {
        let inner = Arc::new(MemoryStorage::with_objects(&["mp3/1.mp3", "mp3/2.mp3"]));
        let mut flaky = FlakyStorage::new(inner.clone());
        flaky.fail_copy_of = Some("mp3/2.mp3".to_string());
        let relocator = Relocator::new(Arc::new(flaky));

        let result = relocator.relocate(&task(&[("mp3/", "mp3-final/")])).await;

        assert!(matches!(result, Err(StorageError::CopyFailed(_))));
        // First object moved, second stayed put: nothing lost.
        assert_eq!(
            inner.keys(),
            vec!["mp3-final/1.mp3".to_string(), "mp3/2.mp3".to_string()]
        );
    }

    #[tokio::test]
    async fn delete_failure_leaves_a_duplicate_and_rerun_converges() {
        let inner = Arc::new(MemoryStorage::with_objects(&["mp3/1.mp3"]));
        let mut flaky = FlakyStorage::new(inner.clone());
        flaky.fail_delete_of = Some("mp3/1.mp3".to_string());
        let relocator = Relocator::new(Arc::new(flaky));
        let task = task(&[("mp3/", "mp3-final/")]);

        let result = relocator.relocate(&task).await;
        assert!(matches!(result, Err(StorageError::DeleteFailed(_))));

        // Copy succeeded, delete failed: object exists at both prefixes.
        assert_eq!(
            inner.keys(),
            vec!["mp3-final/1.mp3".to_string(), "mp3/1.mp3".to_string()]
        );

        // A retry against a healthy store converges to the moved state.
        let retry = Relocator::new(inner.clone());
        let report = retry.relocate(&task).await.unwrap();
        assert_eq!(report.total_relocated(), 1);
        assert_eq!(inner.keys(), vec!["mp3-final/1.mp3".to_string()]);
    }

    #[tokio::test]
    async fn pairs_are_processed_in_input_order() {
        // The second pair's source is produced by the first pair, so the
        // outcome observably depends on processing order.
        let store = Arc::new(MemoryStorage::with_objects(&["stage1/x"]));
        let relocator = Relocator::new(store.clone());

        relocator
            .relocate(&task(&[("stage1/", "stage2/"), ("stage2/", "stage3/")]))
            .await
            .unwrap();

        assert_eq!(store.keys(), vec!["stage3/x".to_string()]);
    }
}
