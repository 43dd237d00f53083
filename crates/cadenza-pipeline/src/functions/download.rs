//! Nightly download trigger.
//!
//! Submits the batch job that fetches the day's audio content into object
//! storage. The scheduler triggers the post-processing function separately
//! once the job completes.

use std::sync::Arc;

use chrono::Utc;

use cadenza_core::models::{FunctionResponse, ProcessingJobSpec};

use crate::batch::{generate_job_name, ProcessingJobClient};

pub struct DownloadTrigger {
    jobs: Arc<dyn ProcessingJobClient>,
    spec: ProcessingJobSpec,
}

impl DownloadTrigger {
    pub fn new(jobs: Arc<dyn ProcessingJobClient>, spec: ProcessingJobSpec) -> Self {
        Self { jobs, spec }
    }

    /// Handle one scheduler invocation.
    pub async fn handle(&self) -> FunctionResponse {
        let job_name = generate_job_name(Utc::now());
        tracing::info!(job_name = %job_name, "Starting processing job");

        match self.jobs.submit(&job_name, &self.spec).await {
            Ok(job) => {
                tracing::info!(
                    job_name = %job.job_name,
                    job_arn = ?job.job_arn,
                    "Processing job started"
                );
                FunctionResponse::ok(format!(
                    "Processing job {} started successfully!",
                    job.job_name
                ))
            }
            Err(e) => {
                tracing::error!(error = %e, job_name = %job_name, "Failed to start processing job");
                FunctionResponse::error(format!("Error: {}", e))
            }
        }
    }
}
