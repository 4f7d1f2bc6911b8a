//! Device — a registry record for a physical device installed in a house.
//!
//! The registry owns the canonical record. Everything else in the system
//! works on a request-scoped copy.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DevHubError, ValidationError};
use crate::id::DeviceId;
use crate::time::{Timestamp, now};

/// Device family, used to pick the upstream integration.
///
/// Open-ended: any string other than the known families is kept verbatim
/// in [`Other`](Self::Other).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceType {
    Light,
    Thermostat,
    Other(String),
}

impl DeviceType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Light => "light",
            Self::Thermostat => "thermostat",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for DeviceType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "light" => Self::Light,
            "thermostat" => Self::Thermostat,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for DeviceType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<DeviceType> for String {
    fn from(value: DeviceType) -> Self {
        match value {
            DeviceType::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status. Only [`Active`](Self::Active) devices accept commands.
///
/// Transitions are driven by explicit updates; nothing changes a status
/// implicitly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceStatus {
    #[default]
    Active,
    Other(String),
}

impl DeviceStatus {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for DeviceStatus {
    fn from(value: String) -> Self {
        if value == "active" {
            Self::Active
        } else {
            Self::Other(value)
        }
    }
}

impl From<&str> for DeviceStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<DeviceStatus> for String {
    fn from(value: DeviceStatus) -> Self {
        match value {
            DeviceStatus::Active => "active".to_string(),
            DeviceStatus::Other(value) => value,
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A device as stored in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub device_type: DeviceType,
    pub house_id: String,
    pub protocol: String,
    pub driver: String,
    pub location: Option<String>,
    pub status: DeviceStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DevHubError::Validation`] when `name` is empty
    /// ([`ValidationError::EmptyName`]) or when `device_type`, `house_id`,
    /// `protocol` or `driver` is empty ([`ValidationError::EmptyField`]).
    pub fn validate(&self) -> Result<(), DevHubError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.device_type.as_str().trim().is_empty() {
            return Err(ValidationError::EmptyField("device_type").into());
        }
        if self.house_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("house_id").into());
        }
        if self.protocol.trim().is_empty() {
            return Err(ValidationError::EmptyField("protocol").into());
        }
        if self.driver.trim().is_empty() {
            return Err(ValidationError::EmptyField("driver").into());
        }
        Ok(())
    }

    /// Apply a partial update, bumping `updated_at`.
    ///
    /// Identity, type, ownership and creation time are never touched.
    pub fn apply(&mut self, patch: DevicePatch, at: Timestamp) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(location) = patch.location {
            self.location = Some(location);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = at;
    }
}

/// Step-by-step builder for [`Device`].
///
/// Every device gets a fresh id. The creation time defaults to now and the
/// status to [`DeviceStatus::Active`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    name: Option<String>,
    device_type: Option<DeviceType>,
    house_id: Option<String>,
    protocol: Option<String>,
    driver: Option<String>,
    location: Option<String>,
    status: Option<DeviceStatus>,
    created_at: Option<Timestamp>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn device_type(mut self, device_type: impl Into<DeviceType>) -> Self {
        self.device_type = Some(device_type.into());
        self
    }

    #[must_use]
    pub fn house_id(mut self, house_id: impl Into<String>) -> Self {
        self.house_id = Some(house_id.into());
        self
    }

    #[must_use]
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    #[must_use]
    pub fn driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = Some(driver.into());
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<DeviceStatus>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn created_at(mut self, at: Timestamp) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`DevHubError::Validation`] if a required field is missing or empty.
    pub fn build(self) -> Result<Device, DevHubError> {
        let created_at = self.created_at.unwrap_or_else(now);
        let device = Device {
            id: DeviceId::new(),
            name: self.name.unwrap_or_default(),
            device_type: self
                .device_type
                .unwrap_or_else(|| DeviceType::Other(String::new())),
            house_id: self.house_id.unwrap_or_default(),
            protocol: self.protocol.unwrap_or_default(),
            driver: self.driver.unwrap_or_default(),
            location: self.location,
            status: self.status.unwrap_or_default(),
            created_at,
            updated_at: created_at,
        };
        device.validate()?;
        Ok(device)
    }
}

/// Partial update of the mutable device fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DevicePatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub status: Option<DeviceStatus>,
}

impl DevicePatch {
    /// Whether the patch carries no field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.location.is_none() && self.status.is_none()
    }

    /// Check the patch can be applied.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyUpdate`] when no field is set and
    /// [`ValidationError::EmptyName`] when `name` is set to a blank string.
    pub fn validate(&self) -> Result<(), DevHubError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyUpdate.into());
        }
        if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Listing criteria. Unset fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeviceFilter {
    pub house_id: Option<String>,
    pub device_type: Option<DeviceType>,
}

impl DeviceFilter {
    #[must_use]
    pub fn matches(&self, device: &Device) -> bool {
        self.house_id
            .as_deref()
            .is_none_or(|house_id| device.house_id == house_id)
            && self
                .device_type
                .as_ref()
                .is_none_or(|device_type| &device.device_type == device_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp() -> DeviceBuilder {
        Device::builder()
            .name("Lamp1")
            .device_type("light")
            .house_id("h1")
            .protocol("zigbee")
            .driver("drv1")
    }

    #[test]
    fn should_build_active_device_when_required_fields_provided() {
        let device = lamp().build().unwrap();
        assert_eq!(device.name, "Lamp1");
        assert_eq!(device.device_type, DeviceType::Light);
        assert_eq!(device.status, DeviceStatus::Active);
        assert!(device.location.is_none());
        assert_eq!(device.created_at, device.updated_at);
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = lamp().name("  ").build();
        assert!(matches!(
            result,
            Err(DevHubError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_return_validation_error_when_house_id_missing() {
        let result = Device::builder()
            .name("Lamp1")
            .device_type("light")
            .protocol("zigbee")
            .driver("drv1")
            .build();
        assert!(matches!(
            result,
            Err(DevHubError::Validation(ValidationError::EmptyField(
                "house_id"
            )))
        ));
    }

    #[test]
    fn should_return_validation_error_when_device_type_missing() {
        let result = Device::builder()
            .name("Lamp1")
            .house_id("h1")
            .protocol("zigbee")
            .driver("drv1")
            .build();
        assert!(matches!(
            result,
            Err(DevHubError::Validation(ValidationError::EmptyField(
                "device_type"
            )))
        ));
    }

    #[test]
    fn should_keep_unknown_device_type_verbatim() {
        let device_type = DeviceType::from("door_lock");
        assert_eq!(device_type, DeviceType::Other("door_lock".to_string()));
        assert_eq!(device_type.to_string(), "door_lock");
    }

    #[test]
    fn should_serialize_type_and_status_as_plain_strings() {
        let device = lamp().status("disabled").build().unwrap();
        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(json["device_type"], "light");
        assert_eq!(json["status"], "disabled");

        let parsed: Device = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, device);
    }

    #[test]
    fn should_report_only_active_status_as_active() {
        assert!(DeviceStatus::Active.is_active());
        assert!(!DeviceStatus::from("inactive").is_active());
        assert_eq!(DeviceStatus::from("active"), DeviceStatus::Active);
    }

    #[test]
    fn should_apply_patch_without_touching_identity() {
        let mut device = lamp().build().unwrap();
        let original = device.clone();
        let later = original.created_at + chrono::Duration::seconds(5);

        device.apply(
            DevicePatch {
                name: Some("Hall lamp".to_string()),
                location: Some("hall".to_string()),
                status: Some(DeviceStatus::from("inactive")),
            },
            later,
        );

        assert_eq!(device.id, original.id);
        assert_eq!(device.device_type, original.device_type);
        assert_eq!(device.house_id, original.house_id);
        assert_eq!(device.created_at, original.created_at);
        assert_eq!(device.name, "Hall lamp");
        assert_eq!(device.location.as_deref(), Some("hall"));
        assert!(!device.status.is_active());
        assert_eq!(device.updated_at, later);
    }

    #[test]
    fn should_reject_empty_patch() {
        let result = DevicePatch::default().validate();
        assert!(matches!(
            result,
            Err(DevHubError::Validation(ValidationError::EmptyUpdate))
        ));
    }

    #[test]
    fn should_reject_patch_with_blank_name() {
        let patch = DevicePatch {
            name: Some(String::new()),
            ..DevicePatch::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn should_match_filter_on_house_and_type() {
        let device = lamp().build().unwrap();

        assert!(DeviceFilter::default().matches(&device));
        assert!(
            DeviceFilter {
                house_id: Some("h1".to_string()),
                device_type: Some(DeviceType::Light),
            }
            .matches(&device)
        );
        assert!(
            !DeviceFilter {
                house_id: Some("h2".to_string()),
                device_type: None,
            }
            .matches(&device)
        );
        assert!(
            !DeviceFilter {
                house_id: None,
                device_type: Some(DeviceType::Thermostat),
            }
            .matches(&device)
        );
    }
}
