//! Download-trigger function binary.

use std::sync::Arc;

use lambda_runtime::{run, service_fn, Error, LambdaEvent};

use cadenza_core::models::FunctionResponse;
use cadenza_core::PipelineConfig;
use cadenza_pipeline::batch::SageMakerBatchClient;
use cadenza_pipeline::functions::DownloadTrigger;
use cadenza_pipeline::telemetry::init_telemetry;

async fn handler(
    _event: LambdaEvent<serde_json::Value>,
    trigger: &DownloadTrigger,
) -> Result<FunctionResponse, Error> {
    // The invocation payload is opaque and not inspected.
    Ok(trigger.handle().await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_telemetry();

    // Constructed once per container lifecycle, shared across invocations.
    let config = PipelineConfig::from_env()?;
    let spec = config.download_job_spec()?;
    let jobs = Arc::new(SageMakerBatchClient::new(&config.aws_region).await);
    let trigger = DownloadTrigger::new(jobs, spec);

    run(service_fn(|event| handler(event, &trigger))).await
}
