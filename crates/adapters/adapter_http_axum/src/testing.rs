//! Port doubles and request helpers for the router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use serde_json::{Map, Value};

use devhub_app::command_adapter::AdapterSet;
use devhub_app::ports::{
    DeviceRepository, LampSnapshot, LightService, TelemetrySink, TemperatureService,
};
use devhub_app::services::{CommandRouter, DeviceService, Enricher, TelemetryEmitter};
use devhub_domain::device::{Device, DeviceFilter, DevicePatch};
use devhub_domain::error::{DevHubError, ServiceUnavailableError};
use devhub_domain::id::DeviceId;
use devhub_domain::telemetry::TelemetryEvent;
use devhub_domain::time::Timestamp;

use crate::state::AppState;

fn unavailable(service: &'static str) -> DevHubError {
    ServiceUnavailableError {
        service,
        source: Box::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        )),
    }
    .into()
}

#[derive(Default)]
pub struct MemoryRepo {
    devices: Mutex<Vec<Device>>,
}

impl DeviceRepository for MemoryRepo {
    async fn create(&self, device: Device) -> Result<Device, DevHubError> {
        self.devices.lock().unwrap().push(device.clone());
        Ok(device)
    }

    async fn get_by_id(&self, id: DeviceId) -> Result<Option<Device>, DevHubError> {
        Ok(self
            .devices
            .lock()
            .unwrap()
            .iter()
            .find(|device| device.id == id)
            .cloned())
    }

    async fn find(&self, filter: DeviceFilter) -> Result<Vec<Device>, DevHubError> {
        let mut found: Vec<Device> = self
            .devices
            .lock()
            .unwrap()
            .iter()
            .filter(|device| filter.matches(device))
            .cloned()
            .collect();
        found.reverse();
        Ok(found)
    }

    async fn update(
        &self,
        id: DeviceId,
        patch: DevicePatch,
        at: Timestamp,
    ) -> Result<Option<Device>, DevHubError> {
        let mut devices = self.devices.lock().unwrap();
        Ok(devices.iter_mut().find(|device| device.id == id).map(|device| {
            device.apply(patch, at);
            device.clone()
        }))
    }

    async fn delete(&self, id: DeviceId) -> Result<bool, DevHubError> {
        let mut devices = self.devices.lock().unwrap();
        let before = devices.len();
        devices.retain(|device| device.id != id);
        Ok(devices.len() != before)
    }
}

#[derive(Default)]
pub struct StubLight {
    lamps: Vec<LampSnapshot>,
    down: bool,
    commands: AtomicUsize,
}

impl StubLight {
    pub fn commands(&self) -> usize {
        self.commands.load(Ordering::SeqCst)
    }

    fn command(&self) -> Result<(), DevHubError> {
        self.commands.fetch_add(1, Ordering::SeqCst);
        if self.down {
            return Err(unavailable("lamp-service"));
        }
        Ok(())
    }
}

impl LightService for StubLight {
    async fn list_lamps(&self) -> Result<Vec<LampSnapshot>, DevHubError> {
        if self.down {
            return Err(unavailable("lamp-service"));
        }
        Ok(self.lamps.clone())
    }

    async fn toggle(&self, _device_id: DeviceId) -> Result<(), DevHubError> {
        self.command()
    }

    async fn set_brightness(&self, _device_id: DeviceId, _brightness: u8) -> Result<(), DevHubError> {
        self.command()
    }

    async fn set_color(
        &self,
        _device_id: DeviceId,
        _color: Map<String, Value>,
    ) -> Result<(), DevHubError> {
        self.command()
    }
}

#[derive(Default)]
pub struct StubTemperature {
    reading: Option<f64>,
    down: bool,
}

impl TemperatureService for StubTemperature {
    async fn current_temperature(&self, _location: String) -> Result<Option<f64>, DevHubError> {
        if self.down {
            return Err(unavailable("temperature-api"));
        }
        Ok(self.reading)
    }

    async fn set_target_temperature(
        &self,
        _device_id: DeviceId,
        _temperature: f64,
    ) -> Result<(), DevHubError> {
        if self.down {
            return Err(unavailable("temperature-api"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct StubSink {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl StubSink {
    pub fn metric_types(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|event| event.metric_type.clone())
            .collect()
    }
}

impl TelemetrySink for StubSink {
    async fn send(&self, event: TelemetryEvent) -> Result<(), DevHubError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

pub type TestState = AppState<Arc<MemoryRepo>, Arc<StubLight>, Arc<StubTemperature>, Arc<StubSink>>;

/// Shared doubles plus the state built on top of them.
#[derive(Default)]
pub struct Harness {
    pub repo: Arc<MemoryRepo>,
    pub light: Arc<StubLight>,
    pub temperature: Arc<StubTemperature>,
    pub sink: Arc<StubSink>,
}

impl Harness {
    pub fn unreachable_upstreams() -> Self {
        Self {
            light: Arc::new(StubLight {
                down: true,
                ..StubLight::default()
            }),
            temperature: Arc::new(StubTemperature {
                down: true,
                ..StubTemperature::default()
            }),
            ..Self::default()
        }
    }

    pub fn with_upstreams(lamps: Vec<LampSnapshot>, reading: Option<f64>) -> Self {
        Self {
            light: Arc::new(StubLight {
                lamps,
                ..StubLight::default()
            }),
            temperature: Arc::new(StubTemperature {
                reading,
                ..StubTemperature::default()
            }),
            ..Self::default()
        }
    }

    pub fn seed(&self, device: Device) {
        self.repo.devices.lock().unwrap().push(device);
    }

    pub fn state(&self) -> TestState {
        let device_service = DeviceService::new(
            Arc::clone(&self.repo),
            Enricher::new(Arc::clone(&self.light), Arc::clone(&self.temperature)),
            TelemetryEmitter::new(Arc::clone(&self.sink)),
        );
        let command_router = CommandRouter::new(
            Arc::clone(&self.repo),
            AdapterSet::new(Arc::clone(&self.light), Arc::clone(&self.temperature)),
            TelemetryEmitter::new(Arc::clone(&self.sink)),
        );
        AppState::new(device_service, command_router)
    }
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
