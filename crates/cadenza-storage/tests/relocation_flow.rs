//! End-to-end relocation over the local filesystem backend.

#![cfg(feature = "storage-local")]

use std::sync::Arc;

use cadenza_core::models::RelocationTask;
use cadenza_storage::{LocalStorage, Relocator, Storage};
use tempfile::tempdir;

#[tokio::test]
async fn relocates_production_output_on_disk() {
    let dir = tempdir().unwrap();
    let storage: Arc<dyn Storage> = Arc::new(LocalStorage::new(dir.path()).await.unwrap());

    for key in [
        "production/mp3/day1.mp3",
        "production/mp3/day2.mp3",
        "production/wav/day1.wav",
        "production/sentence/day1/part1.wav",
    ] {
        storage.upload(key, key.as_bytes().to_vec()).await.unwrap();
    }

    let task = RelocationTask::from_lists(
        vec![
            "production/mp3/".to_string(),
            "production/wav/".to_string(),
            "production/sentence/".to_string(),
        ],
        vec![
            "production/mp3-final/".to_string(),
            "production/wav-final/".to_string(),
            "production/sentence-final/".to_string(),
        ],
    )
    .unwrap();

    let relocator = Relocator::new(storage.clone());
    let report = relocator.relocate(&task).await.unwrap();

    assert_eq!(report.total_relocated(), 4);

    // Every object lives under its final prefix with the suffix intact and
    // the content it had before the move.
    for (old, new) in [
        ("production/mp3/day1.mp3", "production/mp3-final/day1.mp3"),
        ("production/mp3/day2.mp3", "production/mp3-final/day2.mp3"),
        ("production/wav/day1.wav", "production/wav-final/day1.wav"),
        (
            "production/sentence/day1/part1.wav",
            "production/sentence-final/day1/part1.wav",
        ),
    ] {
        assert!(!storage.exists(old).await.unwrap(), "{} should be gone", old);
        let data = storage.download(new).await.unwrap();
        assert_eq!(data, old.as_bytes());
    }

    // Source prefixes are empty afterwards.
    for prefix in ["production/mp3/", "production/wav/", "production/sentence/"] {
        assert!(storage.list(prefix).await.unwrap().is_empty());
    }

    // Running again finds nothing to do.
    let second = relocator.relocate(&task).await.unwrap();
    assert!(second.is_empty());
}
