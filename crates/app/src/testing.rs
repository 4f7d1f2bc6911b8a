//! In-memory and recording doubles for every port, shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{Map, Value};

use devhub_domain::device::{Device, DeviceFilter, DevicePatch};
use devhub_domain::error::{DevHubError, DispatchFailedError, ServiceUnavailableError};
use devhub_domain::id::DeviceId;
use devhub_domain::telemetry::TelemetryEvent;
use devhub_domain::time::Timestamp;

use crate::ports::{DeviceRepository, LampSnapshot, LightService, TelemetrySink, TemperatureService};

/// How a fake upstream service misbehaves.
#[derive(Debug, Clone, Copy)]
pub enum UpstreamFailure {
    Unavailable,
    Rejected,
}

impl UpstreamFailure {
    fn to_error(self, service: &'static str) -> DevHubError {
        match self {
            Self::Unavailable => ServiceUnavailableError {
                service,
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )),
            }
            .into(),
            Self::Rejected => DispatchFailedError {
                service,
                detail: "status 500".to_string(),
            }
            .into(),
        }
    }
}

#[derive(Default)]
pub struct InMemoryDeviceRepo {
    store: Mutex<HashMap<DeviceId, Device>>,
}

impl InMemoryDeviceRepo {
    pub fn with(devices: impl IntoIterator<Item = Device>) -> Self {
        let repo = Self::default();
        {
            let mut store = repo.store.lock().unwrap();
            for device in devices {
                store.insert(device.id, device);
            }
        }
        repo
    }

    pub fn len(&self) -> usize {
        self.store.lock().unwrap().len()
    }
}

impl DeviceRepository for InMemoryDeviceRepo {
    async fn create(&self, device: Device) -> Result<Device, DevHubError> {
        self.store.lock().unwrap().insert(device.id, device.clone());
        Ok(device)
    }

    async fn get_by_id(&self, id: DeviceId) -> Result<Option<Device>, DevHubError> {
        Ok(self.store.lock().unwrap().get(&id).cloned())
    }

    async fn find(&self, filter: DeviceFilter) -> Result<Vec<Device>, DevHubError> {
        let mut found: Vec<Device> = self
            .store
            .lock()
            .unwrap()
            .values()
            .filter(|device| filter.matches(device))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn update(
        &self,
        id: DeviceId,
        patch: DevicePatch,
        at: Timestamp,
    ) -> Result<Option<Device>, DevHubError> {
        let mut store = self.store.lock().unwrap();
        Ok(store.get_mut(&id).map(|device| {
            device.apply(patch, at);
            device.clone()
        }))
    }

    async fn delete(&self, id: DeviceId) -> Result<bool, DevHubError> {
        Ok(self.store.lock().unwrap().remove(&id).is_some())
    }
}

/// A registry that fails every call.
pub struct BrokenDeviceRepo;

impl DeviceRepository for BrokenDeviceRepo {
    async fn create(&self, _device: Device) -> Result<Device, DevHubError> {
        Err(broken())
    }

    async fn get_by_id(&self, _id: DeviceId) -> Result<Option<Device>, DevHubError> {
        Err(broken())
    }

    async fn find(&self, _filter: DeviceFilter) -> Result<Vec<Device>, DevHubError> {
        Err(broken())
    }

    async fn update(
        &self,
        _id: DeviceId,
        _patch: DevicePatch,
        _at: Timestamp,
    ) -> Result<Option<Device>, DevHubError> {
        Err(broken())
    }

    async fn delete(&self, _id: DeviceId) -> Result<bool, DevHubError> {
        Err(broken())
    }
}

fn broken() -> DevHubError {
    DevHubError::storage(std::io::Error::other("registry down"))
}

#[derive(Debug, Clone, PartialEq)]
pub enum LightCall {
    List,
    Toggle(DeviceId),
    Brightness(DeviceId, u8),
    Color(DeviceId, Map<String, Value>),
}

#[derive(Default)]
pub struct FakeLightService {
    lamps: Vec<LampSnapshot>,
    failure: Option<UpstreamFailure>,
    calls: Mutex<Vec<LightCall>>,
}

impl FakeLightService {
    pub fn with_lamps(lamps: Vec<LampSnapshot>) -> Self {
        Self {
            lamps,
            ..Self::default()
        }
    }

    pub fn failing(failure: UpstreamFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<LightCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Commands only, listing calls excluded.
    pub fn commands(&self) -> Vec<LightCall> {
        self.calls()
            .into_iter()
            .filter(|call| *call != LightCall::List)
            .collect()
    }

    fn record(&self, call: LightCall) -> Result<(), DevHubError> {
        self.calls.lock().unwrap().push(call);
        match self.failure {
            Some(failure) => Err(failure.to_error("lamp-service")),
            None => Ok(()),
        }
    }
}

impl LightService for FakeLightService {
    async fn list_lamps(&self) -> Result<Vec<LampSnapshot>, DevHubError> {
        self.record(LightCall::List)?;
        Ok(self.lamps.clone())
    }

    async fn toggle(&self, device_id: DeviceId) -> Result<(), DevHubError> {
        self.record(LightCall::Toggle(device_id))
    }

    async fn set_brightness(&self, device_id: DeviceId, brightness: u8) -> Result<(), DevHubError> {
        self.record(LightCall::Brightness(device_id, brightness))
    }

    async fn set_color(
        &self,
        device_id: DeviceId,
        color: Map<String, Value>,
    ) -> Result<(), DevHubError> {
        self.record(LightCall::Color(device_id, color))
    }
}

#[derive(Default)]
pub struct FakeTemperatureService {
    readings: HashMap<String, f64>,
    failure: Option<UpstreamFailure>,
    reads: Mutex<Vec<String>>,
    writes: Mutex<Vec<(DeviceId, f64)>>,
}

impl FakeTemperatureService {
    pub fn with_reading(location: &str, value: f64) -> Self {
        let mut readings = HashMap::new();
        readings.insert(location.to_string(), value);
        Self {
            readings,
            ..Self::default()
        }
    }

    pub fn failing(failure: UpstreamFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<(DeviceId, f64)> {
        self.writes.lock().unwrap().clone()
    }
}

impl TemperatureService for FakeTemperatureService {
    async fn current_temperature(&self, location: String) -> Result<Option<f64>, DevHubError> {
        self.reads.lock().unwrap().push(location.clone());
        if let Some(failure) = self.failure {
            return Err(failure.to_error("temperature-api"));
        }
        Ok(self.readings.get(&location).copied())
    }

    async fn set_target_temperature(
        &self,
        device_id: DeviceId,
        temperature: f64,
    ) -> Result<(), DevHubError> {
        self.writes.lock().unwrap().push((device_id, temperature));
        match self.failure {
            Some(failure) => Err(failure.to_error("temperature-api")),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct RecordingTelemetrySink {
    fail: bool,
    events: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingTelemetrySink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn metric_types(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .map(|event| event.metric_type)
            .collect()
    }
}

impl TelemetrySink for RecordingTelemetrySink {
    async fn send(&self, event: TelemetryEvent) -> Result<(), DevHubError> {
        self.events.lock().unwrap().push(event);
        if self.fail {
            return Err(UpstreamFailure::Unavailable.to_error("telemetry-service"));
        }
        Ok(())
    }
}

pub fn light_device() -> Device {
    Device::builder()
        .name("Lamp1")
        .device_type("light")
        .house_id("h1")
        .protocol("zigbee")
        .driver("drv1")
        .build()
        .unwrap()
}

pub fn thermostat_device(location: &str) -> Device {
    Device::builder()
        .name("Thermostat")
        .device_type("thermostat")
        .house_id("h1")
        .protocol("zigbee")
        .driver("drv2")
        .location(location)
        .build()
        .unwrap()
}
