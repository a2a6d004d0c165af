//! Structured-log subscriber for domain events.
//!
//! [`EventLogger`] drains a bus receiver and emits one `info` line per
//! event. It stops when the [`EventBus`](crate::bus::EventBus) is dropped.

use radiohub_core::events::DomainEvent;
use tokio::sync::broadcast;

/// Background service that logs every domain event.
pub struct EventLogger;

impl EventLogger {
    /// Run the logging loop until the channel closes.
    pub async fn run(mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => Self::log(&event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event logger lagged, some events were not logged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, event logger shutting down");
                    break;
                }
            }
        }
    }

    fn log(event: &DomainEvent) {
        let payload = serde_json::to_string(&event.kind).unwrap_or_default();
        tracing::info!(
            event = event.name(),
            track_id = %event.track_id,
            occurred_at = %event.occurred_at,
            payload = %payload,
            "Domain event"
        );
    }
}
