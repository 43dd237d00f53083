//! Post-processing trigger function binary.

use std::sync::Arc;

use lambda_runtime::{run, service_fn, Error, LambdaEvent};

use cadenza_core::models::FunctionResponse;
use cadenza_core::PipelineConfig;
use cadenza_pipeline::batch::SageMakerBatchClient;
use cadenza_pipeline::events::EventBridgePublisher;
use cadenza_pipeline::functions::PostProcessTrigger;
use cadenza_pipeline::telemetry::init_telemetry;

async fn handler(
    _event: LambdaEvent<serde_json::Value>,
    trigger: &PostProcessTrigger,
) -> Result<FunctionResponse, Error> {
    // The invocation payload is opaque and not inspected.
    Ok(trigger.handle().await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_telemetry();

    // Constructed once per container lifecycle, shared across invocations.
    let config = PipelineConfig::from_env()?;
    let spec = config.post_job_spec()?;
    let jobs = Arc::new(SageMakerBatchClient::new(&config.aws_region).await);
    let events = Arc::new(
        EventBridgePublisher::new(&config.aws_region, config.event_bus_name.clone()).await,
    );
    let trigger = PostProcessTrigger::new(jobs, events, spec, config.event_source.clone());

    run(service_fn(|event| handler(event, &trigger))).await
}
