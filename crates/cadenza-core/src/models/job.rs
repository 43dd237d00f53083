//! Batch processing job specification.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// When the batch service uploads job output back to object storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum OutputUploadMode {
    /// Upload once, after the job finishes.
    EndOfJob,
    /// Upload continuously while the job runs.
    Continuous,
}

impl Display for OutputUploadMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            OutputUploadMode::EndOfJob => write!(f, "EndOfJob"),
            OutputUploadMode::Continuous => write!(f, "Continuous"),
        }
    }
}

/// A static batch-processing job request: container image, entrypoint,
/// script input, output destination, resource sizing, execution role, and
/// runtime ceiling. The job name is supplied per submission, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingJobSpec {
    pub image_uri: String,
    pub container_entrypoint: Vec<String>,
    /// Object-store URI of the entry script mounted into the container.
    pub script_uri: String,
    pub script_local_path: String,
    /// Object-store URI the container's output directory is uploaded to.
    pub output_uri: String,
    pub output_local_path: String,
    pub output_upload_mode: OutputUploadMode,
    pub instance_type: String,
    pub instance_count: i32,
    pub volume_size_gb: i32,
    pub role_arn: String,
    pub max_runtime_secs: i32,
}

/// A job the batch service accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedJob {
    pub job_name: String,
    pub job_arn: Option<String>,
}
