//! Cadenza Core Library
//!
//! This crate provides the domain models, error types, and configuration
//! shared across the Cadenza pipeline components.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use models::{
    FunctionResponse, OutputUploadMode, PairReport, PipelineEvent, PrefixPair, ProcessingJobSpec,
    RelocatedObject, RelocationReport, RelocationTask, SubmittedJob,
};
pub use storage_types::StorageBackend;
