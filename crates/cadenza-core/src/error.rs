//! Error types module
//!
//! This module provides the error taxonomy used throughout the pipeline.
//! Every failure a function handler can observe is one of these variants,
//! so handlers can discriminate causes without string matching while still
//! mapping everything to the fixed-shape 500 response the scheduler expects.

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A list/copy/delete call against the object store failed.
    #[error("Object store unavailable: {0}")]
    StoreUnavailable(String),

    /// The batch-processing API rejected the job submission.
    #[error("Processing job submission rejected: {0}")]
    JobSubmissionRejected(String),

    /// The event bus rejected or failed a publish. Best-effort at call
    /// sites: callers log this and continue.
    #[error("Event publish failed: {0}")]
    EventPublishFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    /// Machine-readable error code (e.g., "STORE_UNAVAILABLE")
    pub fn error_code(&self) -> &'static str {
        match self {
            PipelineError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            PipelineError::JobSubmissionRejected(_) => "JOB_SUBMISSION_REJECTED",
            PipelineError::EventPublishFailed(_) => "EVENT_PUBLISH_FAILED",
            PipelineError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// HTTP status code to surface to the invoking scheduler.
    ///
    /// The invocation contract is coarse: any failure is a 500. The enum
    /// exists for internal callers, not for richer external reporting.
    pub fn status_code(&self) -> u16 {
        500
    }
}
