//! # hestiad — hestia daemon
//!
//! Composition root that wires registries, services and the HTTP adapter
//! together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`hestia.toml` + env vars)
//! - Initialize tracing
//! - Construct the in-memory registries and application services
//! - Optionally seed the default device fleet and rooms
//! - Build the axum router and serve
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use hestia_adapter_http_axum::router;
use hestia_adapter_http_axum::state::AppState;
use hestia_app::registry::MemoryRegistry;
use hestia_app::services::device_service::DeviceService;
use hestia_app::services::room_service::RoomService;
use hestia_app::services::scenario_service::ScenarioService;
use hestia_domain::device::{AirConditioner, Device, DeviceState, Lamp, LampColor, Tv};
use hestia_domain::id::{DeviceId, RoomId};
use hestia_domain::room::{Room, RoomKind};

use crate::config::Config;

type DeviceRegistry = MemoryRegistry<DeviceId, Device>;
type RoomRegistry = MemoryRegistry<RoomId, Room>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Services
    let device_service = Arc::new(DeviceService::new(MemoryRegistry::new()));
    let room_service = Arc::new(RoomService::new(
        MemoryRegistry::new(),
        Arc::clone(&device_service),
    ));
    let scenario_service = Arc::new(ScenarioService::new(
        MemoryRegistry::new(),
        Arc::clone(&device_service),
    ));

    if config.seed.enabled {
        seed(&device_service, &room_service);
    }

    // HTTP
    let state = AppState::new(device_service, room_service, scenario_service);
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!("hestiad listening on http://{bind_addr}");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Seed the default fleet: five lamps, two air conditioners, two TVs, and
/// one empty room per kind.
fn seed(devices: &DeviceService<DeviceRegistry>, rooms: &RoomService<RoomRegistry, DeviceRegistry>) {
    let lamps = [
        (LampColor::White, 50),
        (LampColor::White, 75),
        (LampColor::Yellow, 75),
        (LampColor::Yellow, 75),
        (LampColor::Yellow, 75),
    ];
    for (color, intensity) in lamps {
        devices.register_device(DeviceState::Lamp(Lamp::new(color, intensity)));
    }
    for _ in 0..2 {
        devices.register_device(DeviceState::AirConditioner(AirConditioner::default()));
        devices.register_device(DeviceState::Tv(Tv::default()));
    }
    for kind in RoomKind::ALL {
        rooms.create_room(kind);
    }
    tracing::info!("seeded default fleet and rooms");
}
