//! Storage port — the device registry.

use std::future::Future;
use std::sync::Arc;

use devhub_domain::device::{Device, DeviceFilter, DevicePatch};
use devhub_domain::error::DevHubError;
use devhub_domain::id::DeviceId;
use devhub_domain::time::Timestamp;

/// Repository owning the canonical [`Device`] records.
pub trait DeviceRepository {
    /// Insert a new device.
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, DevHubError>> + Send;

    /// Get a device by its unique identifier.
    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DevHubError>> + Send;

    /// List devices matching `filter`, newest first.
    fn find(
        &self,
        filter: DeviceFilter,
    ) -> impl Future<Output = Result<Vec<Device>, DevHubError>> + Send;

    /// Apply `patch` to an existing device, returning the stored result.
    ///
    /// Returns `Ok(None)` when no device with `id` exists.
    fn update(
        &self,
        id: DeviceId,
        patch: DevicePatch,
        at: Timestamp,
    ) -> impl Future<Output = Result<Option<Device>, DevHubError>> + Send;

    /// Delete a device. Returns whether a record was removed.
    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<bool, DevHubError>> + Send;
}

impl<T: DeviceRepository + Send + Sync> DeviceRepository for Arc<T> {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, DevHubError>> + Send {
        (**self).create(device)
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DevHubError>> + Send {
        (**self).get_by_id(id)
    }

    fn find(
        &self,
        filter: DeviceFilter,
    ) -> impl Future<Output = Result<Vec<Device>, DevHubError>> + Send {
        (**self).find(filter)
    }

    fn update(
        &self,
        id: DeviceId,
        patch: DevicePatch,
        at: Timestamp,
    ) -> impl Future<Output = Result<Option<Device>, DevHubError>> + Send {
        (**self).update(id, patch, at)
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<bool, DevHubError>> + Send {
        (**self).delete(id)
    }
}
