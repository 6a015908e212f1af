//! # hestia-domain
//!
//! Pure domain model for the hestia smart-home service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, raw field maps
//! - Define **Devices** (lamps, air conditioners, TVs) together with their
//!   per-kind partial-update and full-replacement rules
//! - Define **Rooms** (physical spaces holding weak device references)
//! - Define **Scenarios** (named, replayable routines of device actions)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.

pub mod device;
pub mod error;
pub mod fields;
pub mod id;
pub mod room;
pub mod scenario;
