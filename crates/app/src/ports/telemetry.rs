//! Telemetry port — delivery of advisory events to the ingestion service.

use std::future::Future;
use std::sync::Arc;

use devhub_domain::error::DevHubError;
use devhub_domain::telemetry::TelemetryEvent;

/// Delivers a [`TelemetryEvent`] to wherever telemetry is collected.
///
/// Implementations report failures honestly; it is the
/// [`TelemetryEmitter`](crate::services::telemetry::TelemetryEmitter) that
/// decides those failures never reach the caller.
pub trait TelemetrySink {
    fn send(&self, event: TelemetryEvent) -> impl Future<Output = Result<(), DevHubError>> + Send;
}

impl<T: TelemetrySink + Send + Sync> TelemetrySink for Arc<T> {
    fn send(&self, event: TelemetryEvent) -> impl Future<Output = Result<(), DevHubError>> + Send {
        (**self).send(event)
    }
}
