//! Upstream service configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::endpoint::Endpoint;
use crate::error::UpstreamError;
use crate::light::HttpLightService;
use crate::telemetry::HttpTelemetrySink;
use crate::temperature::HttpTemperatureService;

/// Base URLs and timeouts for the upstream services.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Lamp control service base URL.
    pub light_url: String,
    /// Temperature service base URL.
    pub temperature_url: String,
    /// Telemetry ingestion base URL.
    pub telemetry_url: String,
    /// Timeout for command dispatch calls, in seconds.
    pub command_timeout_secs: u64,
    /// Timeout for enrichment reads, in seconds.
    pub enrichment_timeout_secs: u64,
    /// Timeout for telemetry delivery, in seconds.
    pub telemetry_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            light_url: "http://lamp-service:8083".to_string(),
            temperature_url: "http://temperature-api:8081".to_string(),
            telemetry_url: "http://telemetry-service:8084".to_string(),
            command_timeout_secs: 10,
            enrichment_timeout_secs: 5,
            telemetry_timeout_secs: 3,
        }
    }
}

impl UpstreamConfig {
    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    #[must_use]
    pub fn enrichment_timeout(&self) -> Duration {
        Duration::from_secs(self.enrichment_timeout_secs)
    }

    #[must_use]
    pub fn telemetry_timeout(&self) -> Duration {
        Duration::from_secs(self.telemetry_timeout_secs)
    }

    /// Build the three clients sharing one connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Client`] if the HTTP client cannot be
    /// initialised (e.g. TLS backend failure).
    pub fn build(&self) -> Result<Upstream, UpstreamError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(UpstreamError::Client)?;
        Ok(self.build_with(&client))
    }

    /// Build the three clients on top of an existing [`reqwest::Client`].
    #[must_use]
    pub fn build_with(&self, client: &reqwest::Client) -> Upstream {
        let light = Endpoint::new(HttpLightService::SERVICE, client.clone(), &self.light_url);
        let temperature = Endpoint::new(
            HttpTemperatureService::SERVICE,
            client.clone(),
            &self.temperature_url,
        );
        let telemetry = Endpoint::new(
            HttpTelemetrySink::SERVICE,
            client.clone(),
            &self.telemetry_url,
        );

        Upstream {
            light: HttpLightService::new(
                light,
                self.command_timeout(),
                self.enrichment_timeout(),
            ),
            temperature: HttpTemperatureService::new(
                temperature,
                self.command_timeout(),
                self.enrichment_timeout(),
            ),
            telemetry: HttpTelemetrySink::new(telemetry, self.telemetry_timeout()),
        }
    }
}

/// The wire clients built from an [`UpstreamConfig`].
pub struct Upstream {
    pub light: HttpLightService,
    pub temperature: HttpTemperatureService,
    pub telemetry: HttpTelemetrySink,
}
