//! JSON REST handlers for rooms.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use hestia_app::ports::Registry;
use hestia_app::services::room_service::RoomService;
use hestia_domain::device::Device;
use hestia_domain::error::{HestiaError, UpdateError};
use hestia_domain::fields::FieldMap;
use hestia_domain::id::{DeviceId, RoomId, ScenarioId};
use hestia_domain::room::{Room, RoomKind};
use hestia_domain::scenario::Scenario;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a room.
#[derive(Deserialize)]
pub struct CreateRoomRequest {
    pub kind: String,
}

/// Request body for installing a device into a room.
#[derive(Deserialize)]
pub struct InstallDeviceRequest {
    pub device_id: u64,
}

/// Room representation returned to clients: membership resolved into
/// full device snapshots, dangling references silently skipped.
#[derive(Serialize)]
pub struct RoomResponse {
    pub id: RoomId,
    pub kind: RoomKind,
    pub devices: Vec<Device>,
}

impl RoomResponse {
    fn resolve<RR, DR>(service: &RoomService<RR, DR>, room: &Room) -> Self
    where
        RR: Registry<Id = RoomId, Entry = Room>,
        DR: Registry<Id = DeviceId, Entry = Device>,
    {
        Self {
            id: room.id,
            kind: room.kind,
            devices: service.resolve_devices(room),
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<RoomResponse>>),
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
    Ok(Json<RoomResponse>),
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
    Created(Json<RoomResponse>),
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

/// `GET /api/rooms`
pub async fn list<DR, RR, SR>(
    State(state): State<AppState<DR, RR, SR>>,
) -> Result<ListResponse, ApiError>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    let rooms = state
        .room_service
        .list_rooms()
        .iter()
        .map(|room| RoomResponse::resolve(&state.room_service, room))
        .collect();
    Ok(ListResponse::Ok(Json(rooms)))
}

/// `GET /api/rooms/{id}`
pub async fn get<DR, RR, SR>(
    State(state): State<AppState<DR, RR, SR>>,
    Path(id): Path<u64>,
) -> Result<GetResponse, ApiError>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    let room = state.room_service.get_room(RoomId::new(id))?;
    Ok(GetResponse::Ok(Json(RoomResponse::resolve(
        &state.room_service,
        &room,
    ))))
}

/// `POST /api/rooms`
pub async fn create<DR, RR, SR>(
    State(state): State<AppState<DR, RR, SR>>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<CreateResponse, ApiError>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    let Some(kind) = RoomKind::from_name(&req.kind) else {
        return Err(ApiError::from(HestiaError::from(
            UpdateError::InvalidFieldValue {
                field: "kind",
                value: req.kind,
            },
        )));
    };
    let room = state.room_service.create_room(kind);
    Ok(CreateResponse::Created(Json(RoomResponse::resolve(
        &state.room_service,
        &room,
    ))))
}

/// `PUT /api/rooms/{id}`
///
/// Full update: the payload must carry exactly `kind` and `device_ids`
/// (plus an optional matching `id`), and every listed device must exist.
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
    let room = state.room_service.update_room(RoomId::new(id), &body)?;
    Ok(GetResponse::Ok(Json(RoomResponse::resolve(
        &state.room_service,
        &room,
    ))))
}

/// `DELETE /api/rooms/{id}`
pub async fn delete<DR, RR, SR>(
    State(state): State<AppState<DR, RR, SR>>,
    Path(id): Path<u64>,
) -> Result<DeleteResponse, ApiError>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    state.room_service.delete_room(RoomId::new(id))?;
    Ok(DeleteResponse::NoContent)
}

/// `POST /api/rooms/{id}/devices`
pub async fn install_device<DR, RR, SR>(
    State(state): State<AppState<DR, RR, SR>>,
    Path(id): Path<u64>,
    Json(req): Json<InstallDeviceRequest>,
) -> Result<GetResponse, ApiError>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    let room = state
        .room_service
        .install_device(RoomId::new(id), DeviceId::new(req.device_id))?;
    Ok(GetResponse::Ok(Json(RoomResponse::resolve(
        &state.room_service,
        &room,
    ))))
}

/// `DELETE /api/rooms/{id}/devices/{device_id}`
pub async fn remove_device<DR, RR, SR>(
    State(state): State<AppState<DR, RR, SR>>,
    Path((id, device_id)): Path<(u64, u64)>,
) -> Result<GetResponse, ApiError>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    let room = state
        .room_service
        .remove_device(RoomId::new(id), DeviceId::new(device_id))?;
    Ok(GetResponse::Ok(Json(RoomResponse::resolve(
        &state.room_service,
        &room,
    ))))
}
