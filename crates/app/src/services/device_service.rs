//! Device service — registry use-cases with read-time enrichment.

use devhub_domain::device::{Device, DeviceFilter, DevicePatch};
use devhub_domain::enrichment::EnrichedDevice;
use devhub_domain::error::{DevHubError, NotFoundError};
use devhub_domain::id::DeviceId;
use devhub_domain::telemetry::{TelemetryEvent, metric};
use devhub_domain::time::now;

use crate::ports::{DeviceRepository, LightService, TelemetrySink, TemperatureService};
use crate::services::enrichment::Enricher;
use crate::services::telemetry::TelemetryEmitter;

/// Application service for device registration, lookup, update and removal.
pub struct DeviceService<R, L, T, S> {
    repo: R,
    enricher: Enricher<L, T>,
    telemetry: TelemetryEmitter<S>,
}

impl<R, L, T, S> DeviceService<R, L, T, S>
where
    R: DeviceRepository + Send + Sync,
    L: LightService + Send + Sync,
    T: TemperatureService + Send + Sync,
    S: TelemetrySink + Send + Sync,
{
    /// Create a new service from its collaborators.
    pub fn new(repo: R, enricher: Enricher<L, T>, telemetry: TelemetryEmitter<S>) -> Self {
        Self {
            repo,
            enricher,
            telemetry,
        }
    }

    /// Register a new device, then report `device_registered`.
    ///
    /// # Errors
    ///
    /// Returns [`DevHubError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository. Telemetry failures
    /// are never returned.
    #[tracing::instrument(skip(self, device), fields(device_id = %device.id, device_name = %device.name))]
    pub async fn register_device(&self, device: Device) -> Result<Device, DevHubError> {
        device.validate()?;
        let created = self.repo.create(device).await?;
        tracing::info!(device_type = %created.device_type, "device registered");

        self.telemetry
            .emit(TelemetryEvent::count(created.id, metric::DEVICE_REGISTERED))
            .await;
        Ok(created)
    }

    /// Look up a device by id and enrich it.
    ///
    /// # Errors
    ///
    /// Returns [`DevHubError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository. Enrichment never fails.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<EnrichedDevice, DevHubError> {
        let device = self.find_device(id).await?;
        Ok(self.enricher.enrich(device).await)
    }

    /// List devices matching `filter`, newest first, each enriched.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_devices(
        &self,
        filter: DeviceFilter,
    ) -> Result<Vec<EnrichedDevice>, DevHubError> {
        let devices = self.repo.find(filter).await?;
        Ok(self.enricher.enrich_all(devices).await)
    }

    /// Apply a partial update to a device.
    ///
    /// # Errors
    ///
    /// Returns [`DevHubError::Validation`] for an empty patch,
    /// [`DevHubError::NotFound`] when the device does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_device(
        &self,
        id: DeviceId,
        patch: DevicePatch,
    ) -> Result<Device, DevHubError> {
        patch.validate()?;
        self.repo
            .update(id, patch, now())
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Delete a device, then report `device_deleted`.
    ///
    /// # Errors
    ///
    /// Returns [`DevHubError::NotFound`] when the device does not exist,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: DeviceId) -> Result<(), DevHubError> {
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!("device deleted");

        self.telemetry
            .emit(TelemetryEvent::count(id, metric::DEVICE_DELETED))
            .await;
        Ok(())
    }

    async fn find_device(&self, id: DeviceId) -> Result<Device, DevHubError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| not_found(id))
    }
}

fn not_found(id: DeviceId) -> DevHubError {
    NotFoundError {
        entity: "Device",
        id: id.to_string(),
    }
    .into()
}
