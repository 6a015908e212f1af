//! Shared application state for axum handlers.

use std::sync::Arc;

use hestia_app::ports::Registry;
use hestia_app::services::device_service::DeviceService;
use hestia_app::services::room_service::RoomService;
use hestia_app::services::scenario_service::ScenarioService;
use hestia_domain::device::Device;
use hestia_domain::id::{DeviceId, RoomId, ScenarioId};
use hestia_domain::room::Room;
use hestia_domain::scenario::Scenario;

/// Application state shared across all axum handlers.
///
/// Generic over the three registry types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying services themselves
/// do not need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<DR, RR, SR> {
    /// Device fleet service.
    pub device_service: Arc<DeviceService<DR>>,
    /// Room service (resolves weak device references).
    pub room_service: Arc<RoomService<RR, DR>>,
    /// Scenario storage plus the routine executor.
    pub scenario_service: Arc<ScenarioService<SR, DR>>,
}

impl<DR, RR, SR> Clone for AppState<DR, RR, SR> {
    fn clone(&self) -> Self {
        Self {
            device_service: Arc::clone(&self.device_service),
            room_service: Arc::clone(&self.room_service),
            scenario_service: Arc::clone(&self.scenario_service),
        }
    }
}

impl<DR, RR, SR> AppState<DR, RR, SR>
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    /// Create a new application state from pre-wrapped `Arc` services.
    ///
    /// The room and scenario services already hold their own `Arc` handle
    /// onto the device service, so the wiring layer builds that one first
    /// and shares it here.
    pub fn new(
        device_service: Arc<DeviceService<DR>>,
        room_service: Arc<RoomService<RR, DR>>,
        scenario_service: Arc<ScenarioService<SR, DR>>,
    ) -> Self {
        Self {
            device_service,
            room_service,
            scenario_service,
        }
    }
}
