//! Post-processing trigger.
//!
//! Submits the post-processing batch job and emits a lifecycle event so
//! downstream rules can react to the stage change. Event publishing is
//! best-effort and never changes the handler outcome.

use std::sync::Arc;

use chrono::Utc;

use cadenza_core::models::{FunctionResponse, PipelineEvent, ProcessingJobSpec};

use crate::batch::{generate_job_name, ProcessingJobClient};
use crate::events::{publish_best_effort, EventPublisher};

pub struct PostProcessTrigger {
    jobs: Arc<dyn ProcessingJobClient>,
    events: Arc<dyn EventPublisher>,
    spec: ProcessingJobSpec,
    event_source: String,
}

impl PostProcessTrigger {
    pub fn new(
        jobs: Arc<dyn ProcessingJobClient>,
        events: Arc<dyn EventPublisher>,
        spec: ProcessingJobSpec,
        event_source: String,
    ) -> Self {
        Self {
            jobs,
            events,
            spec,
            event_source,
        }
    }

    /// Handle one scheduler invocation.
    pub async fn handle(&self) -> FunctionResponse {
        let job_name = generate_job_name(Utc::now());
        tracing::info!(job_name = %job_name, "Starting post-processing job");

        match self.jobs.submit(&job_name, &self.spec).await {
            Ok(job) => {
                tracing::info!(
                    job_name = %job.job_name,
                    job_arn = ?job.job_arn,
                    "Post-processing job started"
                );

                let event = PipelineEvent::job_started(self.event_source.clone(), &job.job_name);
                publish_best_effort(self.events.as_ref(), &event).await;

                FunctionResponse::ok(format!(
                    "Processing job {} started successfully!",
                    job.job_name
                ))
            }
            Err(e) => {
                tracing::error!(error = %e, job_name = %job_name, "Failed to start post-processing job");

                let event = PipelineEvent::job_failed(self.event_source.clone(), &e.to_string());
                publish_best_effort(self.events.as_ref(), &event).await;

                FunctionResponse::error(format!("Error: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::test_support::{
        test_spec, RecordingEventPublisher, RecordingJobClient,
    };

    const SOURCE: &str = "production.pipeline";

    fn trigger(
        jobs: Arc<RecordingJobClient>,
        events: Arc<RecordingEventPublisher>,
    ) -> PostProcessTrigger {
        PostProcessTrigger::new(jobs, events, test_spec(), SOURCE.to_string())
    }

    #[tokio::test]
    async fn success_emits_job_started_event() {
        let jobs = Arc::new(RecordingJobClient::default());
        let events = Arc::new(RecordingEventPublisher::default());
        let response = trigger(jobs.clone(), events.clone()).handle().await;

        assert_eq!(response.status_code, 200);

        let published = events.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].detail_type, "ProcessingJobStarted");
        assert_eq!(published[0].source, SOURCE);
        assert_eq!(published[0].detail["status"], "Started");
    }

    #[tokio::test]
    async fn rejection_emits_job_failed_event_and_returns_500() {
        let jobs = Arc::new(RecordingJobClient::rejecting());
        let events = Arc::new(RecordingEventPublisher::default());
        let response = trigger(jobs, events.clone()).handle().await;

        assert_eq!(response.status_code, 500);
        assert!(response.body.starts_with("Error:"));

        let published = events.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].detail_type, "ProcessingJobFailed");
        assert_eq!(published[0].detail["status"], "Failure");
    }

    #[tokio::test]
    async fn event_publish_failure_does_not_change_outcome() {
        let jobs = Arc::new(RecordingJobClient::default());
        let events = Arc::new(RecordingEventPublisher::failing());
        let response = trigger(jobs.clone(), events).handle().await;

        // The job was submitted and the handler still reports success.
        assert_eq!(response.status_code, 200);
        assert_eq!(jobs.submitted.lock().unwrap().len(), 1);
    }
}
