//! Event-bus publishing.
//!
//! Lifecycle events signal stage changes to whatever listens on the bus.
//! Delivery is best-effort: publish failures are logged and never abort the
//! operation that produced the event.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_eventbridge::types::PutEventsRequestEntry;
use aws_sdk_eventbridge::Client;

use cadenza_core::models::PipelineEvent;
use cadenza_core::PipelineError;

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &PipelineEvent) -> Result<(), PipelineError>;
}

/// EventBridge implementation of [`EventPublisher`].
pub struct EventBridgePublisher {
    client: Client,
    event_bus_name: String,
}

impl EventBridgePublisher {
    pub async fn new(region: &str, event_bus_name: String) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;

        Self {
            client: Client::new(&config),
            event_bus_name,
        }
    }
}

#[async_trait]
impl EventPublisher for EventBridgePublisher {
    async fn publish(&self, event: &PipelineEvent) -> Result<(), PipelineError> {
        let detail = serde_json::to_string(&event.detail)
            .map_err(|e| PipelineError::EventPublishFailed(e.to_string()))?;

        let entry = PutEventsRequestEntry::builder()
            .source(&event.source)
            .detail_type(&event.detail_type)
            .detail(detail)
            .event_bus_name(&self.event_bus_name)
            .build();

        let response = self
            .client
            .put_events()
            .entries(entry)
            .send()
            .await
            .map_err(|e| PipelineError::EventPublishFailed(e.to_string()))?;

        if response.failed_entry_count() > 0 {
            let reason = response
                .entries()
                .iter()
                .find_map(|entry| entry.error_message())
                .unwrap_or("unknown entry failure");
            return Err(PipelineError::EventPublishFailed(reason.to_string()));
        }

        Ok(())
    }
}

/// Publish an event, logging instead of propagating any failure.
pub async fn publish_best_effort(publisher: &dyn EventPublisher, event: &PipelineEvent) {
    match publisher.publish(event).await {
        Ok(()) => {
            tracing::info!(
                source = %event.source,
                detail_type = %event.detail_type,
                "Event published"
            );
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                source = %event.source,
                detail_type = %event.detail_type,
                "Event publish failed, continuing"
            );
        }
    }
}
