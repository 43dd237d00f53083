//! Cadenza Pipeline Library
//!
//! This crate provides the three serverless function handlers that drive
//! the nightly audio-production pipeline, together with the batch-job and
//! event-bus clients they depend on. Each handler owns its collaborators
//! (constructor injection, no process-global clients) and maps every
//! outcome to the fixed-shape status object the invoking scheduler expects.

pub mod batch;
pub mod events;
pub mod functions;
pub mod telemetry;

// Re-export commonly used types
pub use batch::{generate_job_name, ProcessingJobClient, SageMakerBatchClient};
pub use events::{publish_best_effort, EventBridgePublisher, EventPublisher};
pub use functions::{Cleanup, DownloadTrigger, PostProcessTrigger};
