//! Telemetry event — an advisory record of a state-changing operation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::DeviceId;
use crate::time::{Timestamp, now};

/// Well-known metric types emitted by the gateway itself.
pub mod metric {
    pub const DEVICE_REGISTERED: &str = "device_registered";
    pub const DEVICE_DELETED: &str = "device_deleted";
    pub const COMMAND_EXECUTED: &str = "command_executed";
}

/// Unit used by counter-style events.
pub const COUNT_UNIT: &str = "count";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    pub device_id: DeviceId,
    pub metric_type: String,
    pub value: f64,
    pub unit: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub timestamp: Timestamp,
}

impl TelemetryEvent {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(
        device_id: DeviceId,
        metric_type: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            device_id,
            metric_type: metric_type.into(),
            value,
            unit: unit.into(),
            metadata: Map::new(),
            timestamp: now(),
        }
    }

    /// A counter event (`value = 1`, `unit = "count"`).
    #[must_use]
    pub fn count(device_id: DeviceId, metric_type: impl Into<String>) -> Self {
        Self::new(device_id, metric_type, 1.0, COUNT_UNIT)
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }
}
