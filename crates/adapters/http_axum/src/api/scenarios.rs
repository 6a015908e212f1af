//! JSON REST handlers for scenarios.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use hestia_app::ports::Registry;
use hestia_domain::device::Device;
use hestia_domain::fields::FieldMap;
use hestia_domain::id::{DeviceId, RoomId, ScenarioId};
use hestia_domain::room::Room;
use hestia_domain::scenario::Scenario;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating or replacing a scenario.
#[derive(Deserialize)]
pub struct ScenarioRequest {
    pub name: String,
    #[serde(default)]
    pub routine: Vec<FieldMap>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Scenario>>),
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
    Ok(Json<Scenario>),
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
    Created(Json<Scenario>),
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

/// Possible responses from the apply endpoint.
pub enum ApplyResponse {
    Ok(Json<Vec<FieldMap>>),
}

impl IntoResponse for ApplyResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/scenarios`
pub async fn list<DR, RR, SR>(
    State(state): State<AppState<DR, RR, SR>>,
) -> Result<ListResponse, ApiError>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    let scenarios = state.scenario_service.list_scenarios();
    Ok(ListResponse::Ok(Json(scenarios)))
}

/// `GET /api/scenarios/{id}`
pub async fn get<DR, RR, SR>(
    State(state): State<AppState<DR, RR, SR>>,
    Path(id): Path<u64>,
) -> Result<GetResponse, ApiError>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    let scenario = state.scenario_service.get_scenario(ScenarioId::new(id))?;
    Ok(GetResponse::Ok(Json(scenario)))
}

/// `POST /api/scenarios`
///
/// The routine is stored as-is; actions are only checked when the
/// scenario gets applied.
pub async fn create<DR, RR, SR>(
    State(state): State<AppState<DR, RR, SR>>,
    Json(req): Json<ScenarioRequest>,
) -> Result<CreateResponse, ApiError>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    let scenario = state
        .scenario_service
        .create_scenario(&req.name, req.routine);
    Ok(CreateResponse::Created(Json(scenario)))
}

/// `PUT /api/scenarios/{id}`
pub async fn update<DR, RR, SR>(
    State(state): State<AppState<DR, RR, SR>>,
    Path(id): Path<u64>,
    Json(req): Json<ScenarioRequest>,
) -> Result<GetResponse, ApiError>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    let scenario = state
        .scenario_service
        .update_scenario(ScenarioId::new(id), &req.name, req.routine)?;
    Ok(GetResponse::Ok(Json(scenario)))
}

/// `DELETE /api/scenarios/{id}`
pub async fn delete<DR, RR, SR>(
    State(state): State<AppState<DR, RR, SR>>,
    Path(id): Path<u64>,
) -> Result<DeleteResponse, ApiError>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    state.scenario_service.delete_scenario(ScenarioId::new(id))?;
    Ok(DeleteResponse::NoContent)
}

/// `PATCH /api/scenarios/{id}/apply`
///
/// Executes the routine fail-fast; on error, actions already executed
/// stay applied. On success the body is the routine exactly as stored.
pub async fn apply<DR, RR, SR>(
    State(state): State<AppState<DR, RR, SR>>,
    Path(id): Path<u64>,
) -> Result<ApplyResponse, ApiError>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    let routine = state.scenario_service.apply_scenario(ScenarioId::new(id))?;
    Ok(ApplyResponse::Ok(Json(routine)))
}
