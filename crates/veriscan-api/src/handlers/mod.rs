//! HTTP handlers.

pub mod auth;
pub mod health;
pub mod submissions;
pub mod upload;
