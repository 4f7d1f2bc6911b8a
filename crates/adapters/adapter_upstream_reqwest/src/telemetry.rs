//! HTTP client for telemetry ingestion.

use std::time::Duration;

use devhub_app::ports::TelemetrySink;
use devhub_domain::error::DevHubError;
use devhub_domain::telemetry::TelemetryEvent;

use crate::endpoint::Endpoint;

/// [`TelemetrySink`] posting each event to `{base}/telemetry`.
#[derive(Debug, Clone)]
pub struct HttpTelemetrySink {
    endpoint: Endpoint,
    timeout: Duration,
}

impl HttpTelemetrySink {
    pub const SERVICE: &'static str = "telemetry-service";

    pub(crate) fn new(endpoint: Endpoint, timeout: Duration) -> Self {
        Self { endpoint, timeout }
    }
}

impl TelemetrySink for HttpTelemetrySink {
    async fn send(&self, event: TelemetryEvent) -> Result<(), DevHubError> {
        let request = self.endpoint.post("/telemetry", self.timeout).json(&event);
        self.endpoint.send(request).await?;
        Ok(())
    }
}
