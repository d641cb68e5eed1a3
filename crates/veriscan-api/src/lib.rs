//! Veriscan API Library
//!
//! HTTP handlers, auth middleware, and application setup. The binary in
//! `main.rs` wires this together; integration tests build the same router
//! against an in-memory database and a mock extractor.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::{ErrorBody, HttpAppError};
pub use state::AppState;
