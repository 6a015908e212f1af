//! # hestia-adapter-http-axum
//!
//! HTTP transport for the hestia core. Thin plumbing only: handlers turn
//! JSON requests into typed service calls and map [`HestiaError`] kinds to
//! status codes. No domain logic lives here.
//!
//! [`HestiaError`]: hestia_domain::error::HestiaError

pub mod api;
pub mod error;
pub mod router;
pub mod state;
