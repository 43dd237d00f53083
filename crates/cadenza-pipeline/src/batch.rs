//! Batch processing job submission.
//!
//! The pipeline's heavy lifting runs in managed batch jobs; this module
//! only builds and submits the job request. The service either accepts or
//! rejects it; nothing here polls for completion.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sagemaker::types::{
    AppSpecification, ProcessingClusterConfig, ProcessingInput, ProcessingInstanceType,
    ProcessingOutput, ProcessingOutputConfig, ProcessingResources, ProcessingS3DataType,
    ProcessingS3Input, ProcessingS3InputMode, ProcessingS3Output, ProcessingS3UploadMode,
    ProcessingStoppingCondition,
};
use aws_sdk_sagemaker::Client;
use chrono::{DateTime, Utc};

use cadenza_core::models::{OutputUploadMode, ProcessingJobSpec, SubmittedJob};
use cadenza_core::PipelineError;

/// Unique job name for one submission: `processing-job-{UTC timestamp}`.
pub fn generate_job_name(now: DateTime<Utc>) -> String {
    format!("processing-job-{}", now.format("%Y-%m-%d-%H-%M-%S"))
}

/// Submits batch-processing jobs. The service is a black box that either
/// accepts or rejects the request.
#[async_trait]
pub trait ProcessingJobClient: Send + Sync {
    async fn submit(
        &self,
        job_name: &str,
        spec: &ProcessingJobSpec,
    ) -> Result<SubmittedJob, PipelineError>;
}

/// SageMaker Processing implementation of [`ProcessingJobClient`].
pub struct SageMakerBatchClient {
    client: Client,
}

impl SageMakerBatchClient {
    /// Create a client for the given region using the default credential
    /// chain.
    pub async fn new(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;

        Self {
            client: Client::new(&config),
        }
    }

    async fn submit_inner(&self, job_name: &str, spec: &ProcessingJobSpec) -> Result<SubmittedJob> {
        let cluster = ProcessingClusterConfig::builder()
            .instance_count(spec.instance_count)
            .instance_type(ProcessingInstanceType::from(spec.instance_type.as_str()))
            .volume_size_in_gb(spec.volume_size_gb)
            .build();

        let resources = ProcessingResources::builder()
            .cluster_config(cluster)
            .build();

        let app_spec = AppSpecification::builder()
            .image_uri(&spec.image_uri)
            .set_container_entrypoint(Some(spec.container_entrypoint.clone()))
            .build();

        let script_input = ProcessingS3Input::builder()
            .s3_uri(&spec.script_uri)
            .local_path(&spec.script_local_path)
            .s3_data_type(ProcessingS3DataType::S3Prefix)
            .s3_input_mode(ProcessingS3InputMode::File)
            .build();

        let input = ProcessingInput::builder()
            .input_name("script")
            .s3_input(script_input)
            .build();

        let upload_mode = match spec.output_upload_mode {
            OutputUploadMode::EndOfJob => ProcessingS3UploadMode::EndOfJob,
            OutputUploadMode::Continuous => ProcessingS3UploadMode::Continuous,
        };

        let s3_output = ProcessingS3Output::builder()
            .s3_uri(&spec.output_uri)
            .local_path(&spec.output_local_path)
            .s3_upload_mode(upload_mode)
            .build();

        let output = ProcessingOutput::builder()
            .output_name("output-data")
            .s3_output(s3_output)
            .build();

        let output_config = ProcessingOutputConfig::builder()
            .outputs(output)
            .build();

        let stopping_condition = ProcessingStoppingCondition::builder()
            .max_runtime_in_seconds(spec.max_runtime_secs)
            .build();

        let response = self
            .client
            .create_processing_job()
            .processing_job_name(job_name)
            .processing_resources(resources)
            .app_specification(app_spec)
            .role_arn(&spec.role_arn)
            .processing_inputs(input)
            .processing_output_config(output_config)
            .stopping_condition(stopping_condition)
            .send()
            .await
            .context("Failed to create processing job")?;

        Ok(SubmittedJob {
            job_name: job_name.to_string(),
            job_arn: response.processing_job_arn().map(|s| s.to_string()),
        })
    }
}

#[async_trait]
impl ProcessingJobClient for SageMakerBatchClient {
    async fn submit(
        &self,
        job_name: &str,
        spec: &ProcessingJobSpec,
    ) -> Result<SubmittedJob, PipelineError> {
        self.submit_inner(job_name, spec)
            .await
            .map_err(|e| PipelineError::JobSubmissionRejected(format!("{:#}", e)))
    }
}
