//! HTTP client for the lamp control service.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value, json};

use devhub_app::ports::{LampSnapshot, LightService};
use devhub_domain::error::DevHubError;
use devhub_domain::id::DeviceId;

use crate::endpoint::Endpoint;

#[derive(Debug, Default, Deserialize)]
struct LampListing {
    #[serde(default)]
    data: LampListingData,
}

#[derive(Debug, Default, Deserialize)]
struct LampListingData {
    #[serde(default)]
    lamps: Vec<LampEntry>,
}

#[derive(Debug, Deserialize)]
struct LampEntry {
    id: Value,
    state: Option<Value>,
}

impl From<LampEntry> for LampSnapshot {
    fn from(entry: LampEntry) -> Self {
        let id = match entry.id {
            Value::String(id) => id,
            other => other.to_string(),
        };
        Self {
            id,
            state: entry.state.unwrap_or_else(|| Value::Object(Map::new())),
        }
    }
}

/// [`LightService`] over the lamp service's REST API.
#[derive(Debug, Clone)]
pub struct HttpLightService {
    endpoint: Endpoint,
    command_timeout: Duration,
    read_timeout: Duration,
}

impl HttpLightService {
    pub const SERVICE: &'static str = "lamp-service";

    pub(crate) fn new(endpoint: Endpoint, command_timeout: Duration, read_timeout: Duration) -> Self {
        Self {
            endpoint,
            command_timeout,
            read_timeout,
        }
    }

    async fn command(&self, path: String, body: Option<Value>) -> Result<(), DevHubError> {
        let mut request = self.endpoint.post(&path, self.command_timeout);
        if let Some(body) = body {
            request = request.json(&body);
        }
        self.endpoint.send(request).await?;
        Ok(())
    }
}

impl LightService for HttpLightService {
    async fn list_lamps(&self) -> Result<Vec<LampSnapshot>, DevHubError> {
        let listing: LampListing = self
            .endpoint
            .fetch(self.endpoint.get("/lamps", self.read_timeout))
            .await?;
        Ok(listing
            .data
            .lamps
            .into_iter()
            .map(LampSnapshot::from)
            .collect())
    }

    async fn toggle(&self, device_id: DeviceId) -> Result<(), DevHubError> {
        self.command(format!("/lamps/{device_id}/toggle"), None)
            .await
    }

    async fn set_brightness(&self, device_id: DeviceId, brightness: u8) -> Result<(), DevHubError> {
        self.command(
            format!("/lamps/{device_id}/brightness"),
            Some(json!({ "brightness": brightness })),
        )
        .await
    }

    async fn set_color(
        &self,
        device_id: DeviceId,
        color: Map<String, Value>,
    ) -> Result<(), DevHubError> {
        self.command(format!("/lamps/{device_id}/color"), Some(Value::Object(color)))
            .await
    }
}
