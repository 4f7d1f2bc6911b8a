//! HTTP client for the temperature service.

use std::time::Duration;

use serde_json::{Value, json};

use devhub_app::ports::TemperatureService;
use devhub_domain::error::DevHubError;
use devhub_domain::id::DeviceId;

use crate::endpoint::Endpoint;

/// Command type understood by the temperature service's `/commands` endpoint.
const SET_TEMPERATURE: &str = "SET_TEMPERATURE";

/// [`TemperatureService`] over the temperature service's REST API.
#[derive(Debug, Clone)]
pub struct HttpTemperatureService {
    endpoint: Endpoint,
    command_timeout: Duration,
    read_timeout: Duration,
}

impl HttpTemperatureService {
    pub const SERVICE: &'static str = "temperature-api";

    pub(crate) fn new(endpoint: Endpoint, command_timeout: Duration, read_timeout: Duration) -> Self {
        Self {
            endpoint,
            command_timeout,
            read_timeout,
        }
    }
}

/// Pull a reading out of any of the accepted response shapes:
/// `{"data": {"temperature": x}}`, `{"value": x}` or a bare number.
fn reading(body: &Value) -> Option<f64> {
    body.pointer("/data/temperature")
        .and_then(Value::as_f64)
        .or_else(|| body.get("value").and_then(Value::as_f64))
        .or_else(|| body.as_f64())
}

impl TemperatureService for HttpTemperatureService {
    async fn current_temperature(&self, location: String) -> Result<Option<f64>, DevHubError> {
        let request = self
            .endpoint
            .get("/temperature", self.read_timeout)
            .query(&[("location", location.as_str())]);
        let body: Value = self.endpoint.fetch(request).await?;

        let value = reading(&body);
        if value.is_none() {
            tracing::debug!(
                service = self.endpoint.service(),
                %location,
                "temperature response carried no reading"
            );
        }
        Ok(value)
    }

    async fn set_target_temperature(
        &self,
        device_id: DeviceId,
        temperature: f64,
    ) -> Result<(), DevHubError> {
        let body = json!({
            "type": SET_TEMPERATURE,
            "deviceId": device_id.to_string(),
            "data": {"temperature": temperature},
        });
        let request = self
            .endpoint
            .post("/commands", self.command_timeout)
            .json(&body);
        self.endpoint.send(request).await?;
        Ok(())
    }
}
