//! Pipeline lifecycle events.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// An event published to the event bus to signal a pipeline stage change.
/// Delivery is best-effort: publish failures are logged by the caller and
/// never abort the operation that produced the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineEvent {
    pub source: String,
    pub detail_type: String,
    pub detail: serde_json::Value,
}

impl PipelineEvent {
    pub fn new(
        source: impl Into<String>,
        detail_type: impl Into<String>,
        detail: serde_json::Value,
    ) -> Self {
        Self {
            source: source.into(),
            detail_type: detail_type.into(),
            detail,
        }
    }

    /// A processing job was accepted and started.
    pub fn job_started(source: impl Into<String>, job_name: &str) -> Self {
        Self::new(
            source,
            "ProcessingJobStarted",
            json!({ "job_name": job_name, "status": "Started" }),
        )
    }

    /// A processing job submission failed.
    pub fn job_failed(source: impl Into<String>, error: &str) -> Self {
        Self::new(
            source,
            "ProcessingJobFailed",
            json!({ "status": "Failure", "error": error }),
        )
    }
}
