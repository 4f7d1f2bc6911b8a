//! Enrichment overlay — live fields merged onto a device view at read time.
//!
//! Overlays are response-only. They are never written back to the registry.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::device::Device;

/// Overlay key carrying the light service's view of a lamp.
pub const LAMP_STATE: &str = "lamp_state";
/// Overlay key carrying the current reading for a thermostat's location.
pub const CURRENT_TEMPERATURE: &str = "current_temperature";

/// Ordered set of overlay fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay(Map<String, Value>);

impl Overlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Overlay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// A device view together with whatever overlay could be gathered.
///
/// Serializes as a single flat object: the device fields followed by the
/// overlay fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedDevice {
    #[serde(flatten)]
    pub device: Device,
    #[serde(flatten)]
    pub overlay: Overlay,
}

impl EnrichedDevice {
    /// A view with no overlay, e.g. when the upstream source is down.
    #[must_use]
    pub fn bare(device: Device) -> Self {
        Self {
            device,
            overlay: Overlay::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thermostat() -> Device {
        Device::builder()
            .name("Hall thermostat")
            .device_type("thermostat")
            .house_id("h1")
            .protocol("zigbee")
            .driver("drv1")
            .location("hall")
            .build()
            .unwrap()
    }

    #[test]
    fn should_flatten_overlay_next_to_device_fields() {
        let mut overlay = Overlay::new();
        overlay.insert(CURRENT_TEMPERATURE, 21.5);
        let view = EnrichedDevice {
            device: thermostat(),
            overlay,
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["name"], "Hall thermostat");
        assert_eq!(json["current_temperature"], 21.5);
        assert!(json.get("overlay").is_none());
    }

    #[test]
    fn should_serialize_bare_view_like_the_device() {
        let device = thermostat();
        let view = EnrichedDevice::bare(device.clone());
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            serde_json::to_value(&device).unwrap()
        );
    }
}
