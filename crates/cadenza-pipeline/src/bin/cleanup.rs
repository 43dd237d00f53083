//! Cleanup function binary.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};

use cadenza_core::models::FunctionResponse;
use cadenza_core::PipelineConfig;
use cadenza_pipeline::functions::Cleanup;
use cadenza_pipeline::telemetry::init_telemetry;
use cadenza_storage::create_storage;

async fn handler(
    _event: LambdaEvent<serde_json::Value>,
    cleanup: &Cleanup,
) -> Result<FunctionResponse, Error> {
    // The invocation payload is opaque and not inspected.
    Ok(cleanup.handle().await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_telemetry();

    // Constructed once per container lifecycle, shared across invocations.
    let config = PipelineConfig::from_env()?;
    let storage = create_storage(&config).await?;
    let task = config.relocation_task()?;
    let cleanup = Cleanup::new(storage, task);

    run(service_fn(|event| handler(event, &cleanup))).await
}
