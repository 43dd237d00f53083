//! Relocation task and report models.
//!
//! A relocation task pairs source prefixes with destination prefixes over a
//! flat key namespace. Prefixes are string prefixes of object keys, not
//! directories; by convention they end in `/` but this is assumed, not
//! enforced.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// One (source prefix, destination prefix) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixPair {
    pub source: String,
    pub destination: String,
}

impl PrefixPair {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// An ordered sequence of prefix pairs. Pairs are processed strictly in the
/// order given here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocationTask {
    pairs: Vec<PrefixPair>,
}

impl RelocationTask {
    pub fn new(pairs: Vec<PrefixPair>) -> Self {
        Self { pairs }
    }

    /// Build a task by zipping positionally-paired prefix lists.
    ///
    /// The lists must be equal in length; this is the invariant the original
    /// prefix configuration relies on, so a mismatch is a configuration
    /// error, not something to silently truncate.
    pub fn from_lists(
        sources: Vec<String>,
        destinations: Vec<String>,
    ) -> Result<Self, PipelineError> {
        if sources.len() != destinations.len() {
            return Err(PipelineError::Config(format!(
                "Prefix lists must be equal in length: {} sources, {} destinations",
                sources.len(),
                destinations.len()
            )));
        }

        let pairs = sources
            .into_iter()
            .zip(destinations)
            .map(|(source, destination)| PrefixPair {
                source,
                destination,
            })
            .collect();

        Ok(Self { pairs })
    }

    pub fn pairs(&self) -> &[PrefixPair] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

/// One relocated object: where it was and where it went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocatedObject {
    pub source_key: String,
    pub destination_key: String,
}

/// Outcome of one prefix pair. An empty `relocated` list means no objects
/// were found under the source prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairReport {
    pub source_prefix: String,
    pub destination_prefix: String,
    pub relocated: Vec<RelocatedObject>,
}

/// Outcome of a whole relocation task, one entry per prefix pair in task
/// order. Used for logging and tests; the invoking scheduler still only
/// sees a coarse success/failure signal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocationReport {
    pub pairs: Vec<PairReport>,
}

impl RelocationReport {
    pub fn total_relocated(&self) -> usize {
        self.pairs.iter().map(|p| p.relocated.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_relocated() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_lists_zips_positionally() {
        let task = RelocationTask::from_lists(
            vec!["audio/mp3/".to_string(), "audio/wav/".to_string()],
            vec![
                "audio/mp3-final/".to_string(),
                "audio/wav-final/".to_string(),
            ],
        )
        .unwrap();

        assert_eq!(task.len(), 2);
        assert_eq!(task.pairs()[0].source, "audio/mp3/");
        assert_eq!(task.pairs()[0].destination, "audio/mp3-final/");
        assert_eq!(task.pairs()[1].source, "audio/wav/");
        assert_eq!(task.pairs()[1].destination, "audio/wav-final/");
    }

    #[test]
    fn from_lists_rejects_length_mismatch() {
        let result = RelocationTask::from_lists(
            vec!["a/".to_string(), "b/".to_string()],
            vec!["c/".to_string()],
        );
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn report_counts_across_pairs() {
        let report = RelocationReport {
            pairs: vec![
                PairReport {
                    source_prefix: "a/".to_string(),
                    destination_prefix: "b/".to_string(),
                    relocated: vec![RelocatedObject {
                        source_key: "a/1.mp3".to_string(),
                        destination_key: "b/1.mp3".to_string(),
                    }],
                },
                PairReport {
                    source_prefix: "c/".to_string(),
                    destination_prefix: "d/".to_string(),
                    relocated: vec![],
                },
            ],
        };

        assert_eq!(report.total_relocated(), 1);
        assert!(!report.is_empty());
    }
}
