//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod rooms;
#[allow(clippy::missing_errors_doc)]
pub mod scenarios;

use axum::Router;
use axum::routing::{delete, get, patch, post};

use hestia_app::ports::Registry;
use hestia_domain::device::Device;
use hestia_domain::id::{DeviceId, RoomId, ScenarioId};
use hestia_domain::room::Room;
use hestia_domain::scenario::Scenario;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<DR, RR, SR>() -> Router<AppState<DR, RR, SR>>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    Router::new()
        // Devices
        .route(
            "/devices",
            get(devices::list::<DR, RR, SR>).post(devices::create::<DR, RR, SR>),
        )
        .route(
            "/devices/{id}",
            get(devices::get::<DR, RR, SR>)
                .patch(devices::update::<DR, RR, SR>)
                .put(devices::replace::<DR, RR, SR>)
                .delete(devices::delete::<DR, RR, SR>),
        )
        // Rooms
        .route(
            "/rooms",
            get(rooms::list::<DR, RR, SR>).post(rooms::create::<DR, RR, SR>),
        )
        .route(
            "/rooms/{id}",
            get(rooms::get::<DR, RR, SR>)
                .put(rooms::update::<DR, RR, SR>)
                .delete(rooms::delete::<DR, RR, SR>),
        )
        .route("/rooms/{id}/devices", post(rooms::install_device::<DR, RR, SR>))
        .route(
            "/rooms/{id}/devices/{device_id}",
            delete(rooms::remove_device::<DR, RR, SR>),
        )
        // Scenarios
        .route(
            "/scenarios",
            get(scenarios::list::<DR, RR, SR>).post(scenarios::create::<DR, RR, SR>),
        )
        .route(
            "/scenarios/{id}",
            get(scenarios::get::<DR, RR, SR>)
                .put(scenarios::update::<DR, RR, SR>)
                .delete(scenarios::delete::<DR, RR, SR>),
        )
        .route("/scenarios/{id}/apply", patch(scenarios::apply::<DR, RR, SR>))
}
