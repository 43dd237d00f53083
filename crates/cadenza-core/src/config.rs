//! Configuration module
//!
//! This module provides configuration for the pipeline functions: object
//! storage, batch-job sizing, event bus naming, and the cleanup prefix
//! lists. Everything is read from the environment once per invocation and
//! passed into the handlers explicitly.

use std::env;
use std::str::FromStr;

use crate::error::PipelineError;
use crate::models::{OutputUploadMode, ProcessingJobSpec, RelocationTask};
use crate::storage_types::StorageBackend;

// Resource defaults, matching the nightly production jobs.
const DOWNLOAD_INSTANCE_TYPE: &str = "ml.m5.large";
const DOWNLOAD_VOLUME_GB: i32 = 20;
const DOWNLOAD_MAX_RUNTIME_SECS: i32 = 12_600;
const POST_INSTANCE_TYPE: &str = "ml.r5.4xlarge";
const POST_VOLUME_GB: i32 = 50;
const POST_MAX_RUNTIME_SECS: i32 = 14_400;
const INSTANCE_COUNT: i32 = 1;

/// Container paths the batch service mounts the script and output at.
const SCRIPT_LOCAL_PATH: &str = "/opt/ml/processing/input/code";
const OUTPUT_LOCAL_PATH: &str = "/opt/ml/processing/output";

const DEFAULT_EVENT_BUS: &str = "default";
const DEFAULT_EVENT_SOURCE: &str = "production.pipeline";

const DEFAULT_SOURCE_PREFIXES: &str = "production/mp3/,production/wav/,production/sentence/";
const DEFAULT_FINAL_PREFIXES: &str =
    "production/mp3-final/,production/wav-final/,production/sentence-final/";

/// Pipeline configuration, read once from the environment.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub environment: String,
    pub aws_region: String,
    // Storage configuration
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers
    pub local_storage_path: Option<String>,
    // Event bus configuration
    pub event_bus_name: String,
    pub event_source: String,
    // Batch job configuration
    pub processing_image_uri: Option<String>,
    pub processing_role_arn: Option<String>,
    pub download_script_uri: Option<String>,
    pub download_output_uri: Option<String>,
    pub download_instance_type: String,
    pub download_volume_gb: i32,
    pub download_max_runtime_secs: i32,
    pub post_script_uri: Option<String>,
    pub post_output_uri: Option<String>,
    pub post_instance_type: String,
    pub post_volume_gb: i32,
    pub post_max_runtime_secs: i32,
    // Cleanup prefix lists, positionally paired
    pub cleanup_source_prefixes: Vec<String>,
    pub cleanup_final_prefixes: Vec<String>,
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Derive the container entrypoint from the script URI: the batch service
/// mounts the script under `script_local_path`, so the entrypoint runs it
/// from there by filename.
fn script_entrypoint(script_uri: &str, script_local_path: &str) -> Result<Vec<String>, anyhow::Error> {
    let filename = script_uri
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow::anyhow!("Script URI has no filename: {}", script_uri))?;

    Ok(vec![
        "python".to_string(),
        format!("{}/{}", script_local_path, filename),
    ])
}

impl PipelineConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let storage_backend = env::var("STORAGE_BACKEND")
            .ok()
            .map(|s| StorageBackend::from_str(&s))
            .transpose()?;

        let cleanup_source_prefixes = split_csv(
            &env::var("CLEANUP_SOURCE_PREFIXES")
                .unwrap_or_else(|_| DEFAULT_SOURCE_PREFIXES.to_string()),
        );
        let cleanup_final_prefixes = split_csv(
            &env::var("CLEANUP_FINAL_PREFIXES")
                .unwrap_or_else(|_| DEFAULT_FINAL_PREFIXES.to_string()),
        );

        let config = PipelineConfig {
            environment,
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            event_bus_name: env::var("EVENT_BUS_NAME")
                .unwrap_or_else(|_| DEFAULT_EVENT_BUS.to_string()),
            event_source: env::var("EVENT_SOURCE")
                .unwrap_or_else(|_| DEFAULT_EVENT_SOURCE.to_string()),
            processing_image_uri: env::var("PROCESSING_IMAGE_URI").ok(),
            processing_role_arn: env::var("PROCESSING_ROLE_ARN").ok(),
            download_script_uri: env::var("DOWNLOAD_SCRIPT_URI").ok(),
            download_output_uri: env::var("DOWNLOAD_OUTPUT_URI").ok(),
            download_instance_type: env::var("DOWNLOAD_INSTANCE_TYPE")
                .unwrap_or_else(|_| DOWNLOAD_INSTANCE_TYPE.to_string()),
            download_volume_gb: env::var("DOWNLOAD_VOLUME_GB")
                .unwrap_or_else(|_| DOWNLOAD_VOLUME_GB.to_string())
                .parse::<i32>()
                .unwrap_or(DOWNLOAD_VOLUME_GB),
            download_max_runtime_secs: env::var("DOWNLOAD_MAX_RUNTIME_SECS")
                .unwrap_or_else(|_| DOWNLOAD_MAX_RUNTIME_SECS.to_string())
                .parse::<i32>()
                .unwrap_or(DOWNLOAD_MAX_RUNTIME_SECS),
            post_script_uri: env::var("POST_SCRIPT_URI").ok(),
            post_output_uri: env::var("POST_OUTPUT_URI").ok(),
            post_instance_type: env::var("POST_INSTANCE_TYPE")
                .unwrap_or_else(|_| POST_INSTANCE_TYPE.to_string()),
            post_volume_gb: env::var("POST_VOLUME_GB")
                .unwrap_or_else(|_| POST_VOLUME_GB.to_string())
                .parse::<i32>()
                .unwrap_or(POST_VOLUME_GB),
            post_max_runtime_secs: env::var("POST_MAX_RUNTIME_SECS")
                .unwrap_or_else(|_| POST_MAX_RUNTIME_SECS.to_string())
                .parse::<i32>()
                .unwrap_or(POST_MAX_RUNTIME_SECS),
            cleanup_source_prefixes,
            cleanup_final_prefixes,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check invariants that would otherwise surface as confusing runtime
    /// behavior: the prefix lists must be positionally paired.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.cleanup_source_prefixes.len() != self.cleanup_final_prefixes.len() {
            return Err(anyhow::anyhow!(
                "CLEANUP_SOURCE_PREFIXES and CLEANUP_FINAL_PREFIXES must have the same number of entries ({} vs {})",
                self.cleanup_source_prefixes.len(),
                self.cleanup_final_prefixes.len()
            ));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// The relocation task for the cleanup function.
    pub fn relocation_task(&self) -> Result<RelocationTask, PipelineError> {
        RelocationTask::from_lists(
            self.cleanup_source_prefixes.clone(),
            self.cleanup_final_prefixes.clone(),
        )
    }

    fn required(&self, value: &Option<String>, var: &str) -> Result<String, anyhow::Error> {
        value
            .clone()
            .ok_or_else(|| anyhow::anyhow!("{} must be set", var))
    }

    /// Job spec for the nightly download job: fetch the day's content into
    /// object storage, uploading output when the job finishes.
    pub fn download_job_spec(&self) -> Result<ProcessingJobSpec, anyhow::Error> {
        let script_uri = self.required(&self.download_script_uri, "DOWNLOAD_SCRIPT_URI")?;

        Ok(ProcessingJobSpec {
            image_uri: self.required(&self.processing_image_uri, "PROCESSING_IMAGE_URI")?,
            container_entrypoint: script_entrypoint(&script_uri, SCRIPT_LOCAL_PATH)?,
            script_uri,
            script_local_path: SCRIPT_LOCAL_PATH.to_string(),
            output_uri: self.required(&self.download_output_uri, "DOWNLOAD_OUTPUT_URI")?,
            output_local_path: OUTPUT_LOCAL_PATH.to_string(),
            output_upload_mode: OutputUploadMode::EndOfJob,
            instance_type: self.download_instance_type.clone(),
            instance_count: INSTANCE_COUNT,
            volume_size_gb: self.download_volume_gb,
            role_arn: self.required(&self.processing_role_arn, "PROCESSING_ROLE_ARN")?,
            max_runtime_secs: self.download_max_runtime_secs,
        })
    }

    /// Job spec for the post-processing job. Output is uploaded continuously
    /// so downstream consumers can start before the job completes.
    pub fn post_job_spec(&self) -> Result<ProcessingJobSpec, anyhow::Error> {
        let script_uri = self.required(&self.post_script_uri, "POST_SCRIPT_URI")?;

        Ok(ProcessingJobSpec {
            image_uri: self.required(&self.processing_image_uri, "PROCESSING_IMAGE_URI")?,
            container_entrypoint: script_entrypoint(&script_uri, SCRIPT_LOCAL_PATH)?,
            script_uri,
            script_local_path: SCRIPT_LOCAL_PATH.to_string(),
            output_uri: self.required(&self.post_output_uri, "POST_OUTPUT_URI")?,
            output_local_path: OUTPUT_LOCAL_PATH.to_string(),
            output_upload_mode: OutputUploadMode::Continuous,
            instance_type: self.post_instance_type.clone(),
            instance_count: INSTANCE_COUNT,
            volume_size_gb: self.post_volume_gb,
            role_arn: self.required(&self.processing_role_arn, "PROCESSING_ROLE_ARN")?,
            max_runtime_secs: self.post_max_runtime_secs,
        })
    }
}
