//! Telemetry emitter — a best-effort side channel.
//!
//! [`TelemetryEmitter::emit`] returns nothing: a failed delivery is logged
//! and dropped, and can never change the outcome of the operation that
//! produced the event. There is no queue, no backpressure and no retry.

use serde_json::{Map, Value};

use devhub_domain::id::DeviceId;
use devhub_domain::telemetry::TelemetryEvent;

use crate::ports::TelemetrySink;

/// Fire-and-forget wrapper around a [`TelemetrySink`].
pub struct TelemetryEmitter<S> {
    sink: S,
}

impl<S: TelemetrySink + Send + Sync> TelemetryEmitter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Deliver `event` at most once, swallowing any failure.
    ///
    /// Bounded by the sink's own timeout.
    pub async fn emit(&self, event: TelemetryEvent) {
        let device_id = event.device_id;
        let metric_type = event.metric_type.clone();
        match self.sink.send(event).await {
            Ok(()) => tracing::debug!(%device_id, %metric_type, "telemetry delivered"),
            Err(err) => {
                tracing::warn!(%device_id, %metric_type, error = %err, "failed to send telemetry");
            }
        }
    }

    /// Build and emit an event from its parts.
    pub async fn emit_metric(
        &self,
        device_id: DeviceId,
        metric_type: &str,
        value: f64,
        unit: &str,
        metadata: Map<String, Value>,
    ) {
        let event = TelemetryEvent::new(device_id, metric_type, value, unit).with_metadata(metadata);
        self.emit(event).await;
    }
}
