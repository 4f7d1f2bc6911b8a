//! JSON REST handlers for devices.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use devhub_app::ports::{DeviceRepository, LightService, TelemetrySink, TemperatureService};
use devhub_domain::command::{Command, CommandOutcome};
use devhub_domain::device::{Device, DeviceFilter, DevicePatch, DeviceType};
use devhub_domain::enrichment::EnrichedDevice;
use devhub_domain::error::{DevHubError, NotFoundError};
use devhub_domain::id::DeviceId;

use super::Success;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering a device.
///
/// Missing fields are read as empty and rejected by validation, so every
/// malformed registration answers 400.
#[derive(Deserialize)]
pub struct CreateDeviceRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub device_type: String,
    #[serde(default)]
    pub house_id: String,
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub driver: String,
    pub location: Option<String>,
}

/// Query string accepted by the list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub house_id: Option<String>,
    pub device_type: Option<String>,
}

impl From<ListParams> for DeviceFilter {
    fn from(params: ListParams) -> Self {
        Self {
            house_id: params.house_id.filter(|value| !value.is_empty()),
            device_type: params
                .device_type
                .filter(|value| !value.is_empty())
                .map(DeviceType::from),
        }
    }
}

#[derive(Serialize)]
pub struct DevicesData<D> {
    devices: Vec<D>,
}

#[derive(Serialize)]
pub struct DeviceData<D> {
    device: D,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Vec<EnrichedDevice>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(devices) => Success::json(DevicesData { devices }).into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(EnrichedDevice),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(device) => Success::json(DeviceData { device }).into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Device),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(device) => {
                (StatusCode::CREATED, Success::json(DeviceData { device })).into_response()
            }
        }
    }
}

/// Possible responses from the update endpoint.
pub enum UpdateResponse {
    Ok(Device),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(device) => Success::json(DeviceData { device }).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Deleted,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Deleted => Json(json!({"success": true})).into_response(),
        }
    }
}

/// Possible responses from the command endpoint.
pub enum CommandResponse {
    Accepted(CommandOutcome),
}

impl IntoResponse for CommandResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(outcome) => Success::json(outcome).into_response(),
        }
    }
}

/// A path segment that is not a device id cannot name a device.
fn parse_id(id: &str) -> Result<DeviceId, ApiError> {
    DeviceId::from_str(id).map_err(|_| {
        ApiError::from(DevHubError::from(NotFoundError {
            entity: "Device",
            id: id.to_string(),
        }))
    })
}

/// `GET /devices`
pub async fn list<R, L, T, S>(
    State(state): State<AppState<R, L, T, S>>,
    Query(params): Query<ListParams>,
) -> Result<ListResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
    L: LightService + Send + Sync + 'static,
    T: TemperatureService + Send + Sync + 'static,
    S: TelemetrySink + Send + Sync + 'static,
{
    let devices = state.device_service.list_devices(params.into()).await?;
    Ok(ListResponse::Ok(devices))
}

/// `GET /devices/{id}`
pub async fn get<R, L, T, S>(
    State(state): State<AppState<R, L, T, S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
    L: LightService + Send + Sync + 'static,
    T: TemperatureService + Send + Sync + 'static,
    S: TelemetrySink + Send + Sync + 'static,
{
    let device_id = parse_id(&id)?;
    let device = state.device_service.get_device(device_id).await?;
    Ok(GetResponse::Ok(device))
}

/// `POST /devices`
pub async fn create<R, L, T, S>(
    State(state): State<AppState<R, L, T, S>>,
    payload: Result<Json<CreateDeviceRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
    L: LightService + Send + Sync + 'static,
    T: TemperatureService + Send + Sync + 'static,
    S: TelemetrySink + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let mut builder = Device::builder()
        .name(req.name)
        .device_type(req.device_type)
        .house_id(req.house_id)
        .protocol(req.protocol)
        .driver(req.driver);
    if let Some(location) = req.location {
        builder = builder.location(location);
    }

    let device = builder.build()?;
    let created = state.device_service.register_device(device).await?;
    Ok(CreateResponse::Created(created))
}

/// `PUT /devices/{id}`
pub async fn update<R, L, T, S>(
    State(state): State<AppState<R, L, T, S>>,
    Path(id): Path<String>,
    payload: Result<Json<DevicePatch>, JsonRejection>,
) -> Result<UpdateResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
    L: LightService + Send + Sync + 'static,
    T: TemperatureService + Send + Sync + 'static,
    S: TelemetrySink + Send + Sync + 'static,
{
    let device_id = parse_id(&id)?;
    let Json(patch) = payload?;
    let device = state.device_service.update_device(device_id, patch).await?;
    Ok(UpdateResponse::Ok(device))
}

/// `DELETE /devices/{id}`
pub async fn delete<R, L, T, S>(
    State(state): State<AppState<R, L, T, S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
    L: LightService + Send + Sync + 'static,
    T: TemperatureService + Send + Sync + 'static,
    S: TelemetrySink + Send + Sync + 'static,
{
    let device_id = parse_id(&id)?;
    state.device_service.delete_device(device_id).await?;
    Ok(DeleteResponse::Deleted)
}

/// `POST /devices/{id}/commands`
pub async fn command<R, L, T, S>(
    State(state): State<AppState<R, L, T, S>>,
    Path(id): Path<String>,
    payload: Result<Json<Command>, JsonRejection>,
) -> Result<CommandResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
    L: LightService + Send + Sync + 'static,
    T: TemperatureService + Send + Sync + 'static,
    S: TelemetrySink + Send + Sync + 'static,
{
    let device_id = parse_id(&id)?;
    let Json(command) = payload?;
    let outcome = state.command_router.dispatch(device_id, command).await?;
    Ok(CommandResponse::Accepted(outcome))
}
