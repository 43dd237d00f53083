//! Shared trait doubles for handler tests.

use std::sync::Mutex;

use async_trait::async_trait;

use cadenza_core::models::{OutputUploadMode, PipelineEvent, ProcessingJobSpec, SubmittedJob};
use cadenza_core::PipelineError;

use crate::batch::ProcessingJobClient;
use crate::events::EventPublisher;

pub(crate) fn test_spec() -> ProcessingJobSpec {
    ProcessingJobSpec {
        image_uri: "123.dkr.ecr.us-east-1.amazonaws.com/audio:latest".to_string(),
        container_entrypoint: vec![
            "python".to_string(),
            "/opt/ml/processing/input/code/job.py".to_string(),
        ],
        script_uri: "s3://bucket/scripts/job.py".to_string(),
        script_local_path: "/opt/ml/processing/input/code".to_string(),
        output_uri: "s3://bucket/production/output/".to_string(),
        output_local_path: "/opt/ml/processing/output".to_string(),
        output_upload_mode: OutputUploadMode::EndOfJob,
        instance_type: "ml.m5.large".to_string(),
        instance_count: 1,
        volume_size_gb: 20,
        role_arn: "arn:aws:iam::123:role/pipeline".to_string(),
        max_runtime_secs: 12_600,
    }
}

/// Records submitted job names; optionally rejects every submission.
#[derive(Default)]
pub(crate) struct RecordingJobClient {
    pub submitted: Mutex<Vec<String>>,
    pub reject: bool,
}

impl RecordingJobClient {
    pub fn rejecting() -> Self {
        Self {
            submitted: Mutex::new(Vec::new()),
            reject: true,
        }
    }
}

#[async_trait]
impl ProcessingJobClient for RecordingJobClient {
    async fn submit(
        &self,
        job_name: &str,
        _spec: &ProcessingJobSpec,
    ) -> Result<SubmittedJob, PipelineError> {
        if self.reject {
            return Err(PipelineError::JobSubmissionRejected(
                "role not authorized".to_string(),
            ));
        }
        self.submitted.lock().unwrap().push(job_name.to_string());
        Ok(SubmittedJob {
            job_name: job_name.to_string(),
            job_arn: Some(format!(
                "arn:aws:sagemaker:us-east-1:123:processing-job/{}",
                job_name
            )),
        })
    }
}

/// A store whose every operation fails, for exercising the 500 path.
pub(crate) struct UnavailableStorage;

#[async_trait]
impl cadenza_storage::Storage for UnavailableStorage {
    async fn list(&self, _prefix: &str) -> cadenza_storage::StorageResult<Vec<String>> {
        Err(cadenza_storage::StorageError::ListFailed(
            "connection refused".to_string(),
        ))
    }

    async fn upload(&self, _key: &str, _data: Vec<u8>) -> cadenza_storage::StorageResult<()> {
        Err(cadenza_storage::StorageError::UploadFailed(
            "connection refused".to_string(),
        ))
    }

    async fn download(&self, _key: &str) -> cadenza_storage::StorageResult<Vec<u8>> {
        Err(cadenza_storage::StorageError::DownloadFailed(
            "connection refused".to_string(),
        ))
    }

    async fn copy(&self, _from_key: &str, _to_key: &str) -> cadenza_storage::StorageResult<()> {
        Err(cadenza_storage::StorageError::CopyFailed(
            "connection refused".to_string(),
        ))
    }

    async fn delete(&self, _key: &str) -> cadenza_storage::StorageResult<()> {
        Err(cadenza_storage::StorageError::DeleteFailed(
            "connection refused".to_string(),
        ))
    }

    async fn exists(&self, _key: &str) -> cadenza_storage::StorageResult<bool> {
        Err(cadenza_storage::StorageError::BackendError(
            "connection refused".to_string(),
        ))
    }

    fn backend_type(&self) -> cadenza_core::StorageBackend {
        cadenza_core::StorageBackend::S3
    }
}

/// Records published events; optionally fails every publish.
#[derive(Default)]
pub(crate) struct RecordingEventPublisher {
    pub published: Mutex<Vec<PipelineEvent>>,
    pub fail: bool,
}

impl RecordingEventPublisher {
    pub fn failing() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, event: &PipelineEvent) -> Result<(), PipelineError> {
        if self.fail {
            return Err(PipelineError::EventPublishFailed(
                "event bus unavailable".to_string(),
            ));
        }
        self.published.lock().unwrap().push(event.clone());
        Ok(())
    }
}
