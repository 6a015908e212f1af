//! Use-case services, one per aggregate.

pub mod device_service;
pub mod room_service;
pub mod scenario_service;
