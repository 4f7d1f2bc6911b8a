//! Enrichment pipeline — merges live upstream state onto registry records.
//!
//! Enrichment is best-effort. Any upstream failure leaves the base record
//! untouched; a read never fails because an enrichment source is down.

use futures::future::join_all;

use devhub_domain::device::{Device, DeviceType};
use devhub_domain::enrichment::{CURRENT_TEMPERATURE, EnrichedDevice, LAMP_STATE};

use crate::ports::{LampSnapshot, LightService, TemperatureService};

/// Pulls `lamp_state` from the light service and `current_temperature`
/// from the temperature service.
pub struct Enricher<L, T> {
    light: L,
    temperature: T,
}

impl<L, T> Enricher<L, T>
where
    L: LightService + Send + Sync,
    T: TemperatureService + Send + Sync,
{
    pub fn new(light: L, temperature: T) -> Self {
        Self { light, temperature }
    }

    /// Enrich a single device.
    #[tracing::instrument(skip_all, fields(device_id = %device.id))]
    pub async fn enrich(&self, device: Device) -> EnrichedDevice {
        let lamps = match device.device_type {
            DeviceType::Light => self.lamp_listing().await,
            _ => None,
        };
        self.enrich_with(device, lamps.as_deref()).await
    }

    /// Enrich a listing.
    ///
    /// The lamp listing is fetched at most once and devices are enriched
    /// concurrently; each device's overlay is computed independently.
    pub async fn enrich_all(&self, devices: Vec<Device>) -> Vec<EnrichedDevice> {
        let lamps = if devices
            .iter()
            .any(|device| device.device_type == DeviceType::Light)
        {
            self.lamp_listing().await
        } else {
            None
        };
        let lamps = lamps.as_deref();

        join_all(
            devices
                .into_iter()
                .map(|device| self.enrich_with(device, lamps)),
        )
        .await
    }

    async fn enrich_with(&self, device: Device, lamps: Option<&[LampSnapshot]>) -> EnrichedDevice {
        let mut view = EnrichedDevice::bare(device);
        match view.device.device_type {
            DeviceType::Light => {
                let id = view.device.id.to_string();
                if let Some(lamp) = lamps.and_then(|lamps| lamps.iter().find(|lamp| lamp.id == id))
                {
                    view.overlay.insert(LAMP_STATE, lamp.state.clone());
                }
            }
            DeviceType::Thermostat => {
                if let Some(temperature) = self.temperature_at(&view.device).await {
                    view.overlay.insert(CURRENT_TEMPERATURE, temperature);
                }
            }
            DeviceType::Other(_) => {}
        }
        view
    }

    async fn lamp_listing(&self) -> Option<Vec<LampSnapshot>> {
        match self.light.list_lamps().await {
            Ok(lamps) => Some(lamps),
            Err(err) => {
                tracing::warn!(error = %err, "lamp listing unavailable, skipping light enrichment");
                None
            }
        }
    }

    async fn temperature_at(&self, device: &Device) -> Option<f64> {
        let location = device.location.clone()?;
        match self.temperature.current_temperature(location).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(device_id = %device.id, error = %err, "temperature unavailable, skipping enrichment");
                None
            }
        }
    }
}
