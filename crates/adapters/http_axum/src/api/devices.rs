//! JSON REST handlers for devices.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use hestia_app::ports::Registry;
use hestia_domain::device::{
    AirConditioner, Device, DeviceKind, DeviceState, Lamp, LampColor, Tv,
};
use hestia_domain::error::{HestiaError, UpdateError};
use hestia_domain::fields::FieldMap;
use hestia_domain::id::{DeviceId, RoomId, ScenarioId};
use hestia_domain::room::Room;
use hestia_domain::scenario::Scenario;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering a device.
///
/// `color` and `intensity` only apply to lamps; air conditioners and TVs
/// always start from their factory defaults.
#[derive(Deserialize)]
pub struct CreateDeviceRequest {
    pub kind: String,
    pub color: Option<String>,
    pub intensity: Option<i64>,
}

impl CreateDeviceRequest {
    fn into_state(self) -> Result<DeviceState, ApiError> {
        let Some(kind) = DeviceKind::from_name(&self.kind) else {
            return Err(invalid("kind", &self.kind));
        };
        let state = match kind {
            DeviceKind::Lamp => {
                let color = match self.color.as_deref() {
                    Some(name) => LampColor::from_name(name).ok_or_else(|| invalid("color", name))?,
                    None => LampColor::White,
                };
                DeviceState::Lamp(Lamp::new(color, self.intensity.unwrap_or(50)))
            }
            DeviceKind::AirConditioner => DeviceState::AirConditioner(AirConditioner::default()),
            DeviceKind::Tv => DeviceState::Tv(Tv::default()),
        };
        Ok(state)
    }
}

fn invalid(field: &'static str, value: &str) -> ApiError {
    ApiError::from(HestiaError::from(UpdateError::InvalidFieldValue {
        field,
        value: value.to_owned(),
    }))
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Device>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Device>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Device>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/devices`
pub async fn list<DR, RR, SR>(
    State(state): State<AppState<DR, RR, SR>>,
) -> Result<ListResponse, ApiError>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    let devices = state.device_service.list_devices();
    Ok(ListResponse::Ok(Json(devices)))
}

/// `GET /api/devices/{id}`
pub async fn get<DR, RR, SR>(
    State(state): State<AppState<DR, RR, SR>>,
    Path(id): Path<u64>,
) -> Result<GetResponse, ApiError>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    let device = state.device_service.get_device(DeviceId::new(id))?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `POST /api/devices`
pub async fn create<DR, RR, SR>(
    State(state): State<AppState<DR, RR, SR>>,
    Json(req): Json<CreateDeviceRequest>,
) -> Result<CreateResponse, ApiError>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    let initial = req.into_state()?;
    let device = state.device_service.register_device(initial);
    Ok(CreateResponse::Created(Json(device)))
}

/// `PATCH /api/devices/{id}`
///
/// Partial update: a request that names no recognized field is rejected
/// rather than silently ignored.
pub async fn update<DR, RR, SR>(
    State(state): State<AppState<DR, RR, SR>>,
    Path(id): Path<u64>,
    Json(body): Json<FieldMap>,
) -> Result<GetResponse, ApiError>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    match state.device_service.update_device(DeviceId::new(id), &body)? {
        Some(device) => Ok(GetResponse::Ok(Json(device))),
        None => Err(ApiError::from(HestiaError::from(
            UpdateError::EmptyOrUnrecognized,
        ))),
    }
}

/// `PUT /api/devices/{id}`
pub async fn replace<DR, RR, SR>(
    State(state): State<AppState<DR, RR, SR>>,
    Path(id): Path<u64>,
    Json(body): Json<FieldMap>,
) -> Result<GetResponse, ApiError>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    let device = state.device_service.replace_device(DeviceId::new(id), &body)?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `DELETE /api/devices/{id}`
pub async fn delete<DR, RR, SR>(
    State(state): State<AppState<DR, RR, SR>>,
    Path(id): Path<u64>,
) -> Result<DeleteResponse, ApiError>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    state.device_service.delete_device(DeviceId::new(id))?;
    Ok(DeleteResponse::NoContent)
}
