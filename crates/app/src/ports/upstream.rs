//! Upstream ports — wire-level access to the device family services.
//!
//! These traits speak each service's own vocabulary (toggle, brightness,
//! heat commands). Translating a generic [`Command`](devhub_domain::command::Command)
//! into these calls is the job of the [`command_adapter`](crate::command_adapter)
//! module.
//!
//! Every implementation must bound its calls with a timeout and classify
//! failures: unreachable or timed out as
//! [`DevHubError::ServiceUnavailable`], an explicit rejection as
//! [`DevHubError::DispatchFailed`].

use std::future::Future;
use std::sync::Arc;

use serde_json::{Map, Value};

use devhub_domain::error::DevHubError;
use devhub_domain::id::DeviceId;

/// One entry of the light service's lamp listing.
#[derive(Debug, Clone, PartialEq)]
pub struct LampSnapshot {
    pub id: String,
    pub state: Value,
}

/// The lamp control service.
pub trait LightService {
    /// Fetch the full lamp listing with each lamp's live state.
    fn list_lamps(&self) -> impl Future<Output = Result<Vec<LampSnapshot>, DevHubError>> + Send;

    fn toggle(&self, device_id: DeviceId) -> impl Future<Output = Result<(), DevHubError>> + Send;

    /// Set brightness, `0..=100`.
    fn set_brightness(
        &self,
        device_id: DeviceId,
        brightness: u8,
    ) -> impl Future<Output = Result<(), DevHubError>> + Send;

    /// Forward a color specification as-is.
    fn set_color(
        &self,
        device_id: DeviceId,
        color: Map<String, Value>,
    ) -> impl Future<Output = Result<(), DevHubError>> + Send;
}

/// The temperature service.
pub trait TemperatureService {
    /// Read the current temperature at `location`.
    ///
    /// Returns `Ok(None)` when the service answers without a usable value.
    fn current_temperature(
        &self,
        location: String,
    ) -> impl Future<Output = Result<Option<f64>, DevHubError>> + Send;

    /// Ask the service to drive a thermostat towards `temperature`.
    fn set_target_temperature(
        &self,
        device_id: DeviceId,
        temperature: f64,
    ) -> impl Future<Output = Result<(), DevHubError>> + Send;
}

impl<T: LightService + Send + Sync> LightService for Arc<T> {
    fn list_lamps(&self) -> impl Future<Output = Result<Vec<LampSnapshot>, DevHubError>> + Send {
        (**self).list_lamps()
    }

    fn toggle(&self, device_id: DeviceId) -> impl Future<Output = Result<(), DevHubError>> + Send {
        (**self).toggle(device_id)
    }

    fn set_brightness(
        &self,
        device_id: DeviceId,
        brightness: u8,
    ) -> impl Future<Output = Result<(), DevHubError>> + Send {
        (**self).set_brightness(device_id, brightness)
    }

    fn set_color(
        &self,
        device_id: DeviceId,
        color: Map<String, Value>,
    ) -> impl Future<Output = Result<(), DevHubError>> + Send {
        (**self).set_color(device_id, color)
    }
}

impl<T: TemperatureService + Send + Sync> TemperatureService for Arc<T> {
    fn current_temperature(
        &self,
        location: String,
    ) -> impl Future<Output = Result<Option<f64>, DevHubError>> + Send {
        (**self).current_temperature(location)
    }

    fn set_target_temperature(
        &self,
        device_id: DeviceId,
        temperature: f64,
    ) -> impl Future<Output = Result<(), DevHubError>> + Send {
        (**self).set_target_temperature(device_id, temperature)
    }
}
