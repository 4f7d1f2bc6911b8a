//! Upstream adapter set — one adapter per device family.
//!
//! Each adapter translates a generic [`Command`] into its family's upstream
//! call and reports the result as an [`Ack`] or a [`DevHubError`]:
//!
//! | Family | Adapter | Actions |
//! |--------|---------|---------|
//! | `light` | [`LightAdapter`] | `turn_on`, `set_brightness`, `set_color` |
//! | `thermostat` | [`ThermostatAdapter`] | `set_temperature` |
//! | anything else | [`GenericAdapter`] | any action, accepted as a no-op |
//!
//! Selection is a single lookup ([`AdapterKind::for_device_type`]) over a
//! closed set of variants held by [`AdapterSet`].

mod generic;
mod light;
mod thermostat;

use std::future::Future;

pub use generic::GenericAdapter;
pub use light::LightAdapter;
pub use thermostat::ThermostatAdapter;

use devhub_domain::command::{Ack, Command};
use devhub_domain::device::DeviceType;
use devhub_domain::error::DevHubError;
use devhub_domain::id::DeviceId;

use crate::ports::{LightService, TemperatureService};

/// Contract shared by every family adapter.
pub trait CommandAdapter {
    /// Adapter name, reported in [`Ack::adapter`].
    const NAME: &'static str;

    /// Translate and forward `command` to the family's upstream service.
    ///
    /// Exactly one upstream call is attempted; nothing is retried.
    fn execute(
        &self,
        device_id: DeviceId,
        command: &Command,
    ) -> impl Future<Output = Result<Ack, DevHubError>> + Send;
}

/// Which adapter handles a device type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterKind {
    Light,
    Thermostat,
    Generic,
}

impl AdapterKind {
    /// Look up the adapter for `device_type`, falling back to
    /// [`Generic`](Self::Generic) for types without a dedicated integration.
    #[must_use]
    pub fn for_device_type(device_type: &DeviceType) -> Self {
        match device_type {
            DeviceType::Light => Self::Light,
            DeviceType::Thermostat => Self::Thermostat,
            DeviceType::Other(_) => Self::Generic,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Thermostat => "thermostat",
            Self::Generic => GenericAdapter::NAME,
        }
    }
}

/// The closed set of family adapters.
pub struct AdapterSet<L, T> {
    light: LightAdapter<L>,
    thermostat: ThermostatAdapter<T>,
    generic: GenericAdapter,
}

impl<L, T> AdapterSet<L, T>
where
    L: LightService + Send + Sync,
    T: TemperatureService + Send + Sync,
{
    /// Build the set from the upstream services it talks to.
    pub fn new(light_service: L, temperature_service: T) -> Self {
        Self {
            light: LightAdapter::new(light_service),
            thermostat: ThermostatAdapter::new(temperature_service),
            generic: GenericAdapter,
        }
    }

    /// Run `command` through the adapter selected by `kind`.
    ///
    /// # Errors
    ///
    /// Propagates the selected adapter's error unchanged.
    pub async fn execute(
        &self,
        kind: AdapterKind,
        device_id: DeviceId,
        command: &Command,
    ) -> Result<Ack, DevHubError> {
        tracing::debug!(adapter = kind.name(), %device_id, "dispatching command");
        match kind {
            AdapterKind::Light => self.light.execute(device_id, command).await,
            AdapterKind::Thermostat => self.thermostat.execute(device_id, command).await,
            AdapterKind::Generic => self.generic.execute(device_id, command).await,
        }
    }
}
