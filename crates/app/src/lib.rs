//! # hestia-app
//!
//! Application layer — use-cases and **port definitions**.
//!
//! ## Responsibilities
//! - Define the [`Registry`](ports::Registry) port that storage adapters
//!   must implement (keyed store + atomic id generator)
//! - Provide **in-process infrastructure** that doesn't need IO
//!   ([`registry::MemoryRegistry`])
//! - Expose use-case services: [`services::device_service::DeviceService`],
//!   [`services::room_service::RoomService`], and
//!   [`services::scenario_service::ScenarioService`]
//! - Orchestrate domain objects without knowing *how* they are stored
//!
//! ## Dependency rule
//! Depends on `hestia-domain` only. Adapters depend on *this* crate, not
//! the reverse.
//!
//! ## Concurrency
//! Every operation is a short, bounded in-memory computation, so services
//! are synchronous: the async boundary lives in the transport adapter. One
//! mutex guards each registry; each update reads-then-writes within that
//! critical section. Scenario application is deliberately not transactional
//! (see [`services::scenario_service::ScenarioService::apply_scenario`]).

pub mod ports;
pub mod registry;
pub mod services;
