//! Database repositories for the Veriscan data access layer.
//!
//! One repository struct per domain entity, each holding a clone of the shared
//! `SqlitePool`. Connections are acquired per operation and released on every
//! exit path by the pool; concurrent writers rely on SQLite's own locking.

pub mod schema;
pub mod submissions;
pub mod users;

pub use schema::init_schema;
pub use submissions::SubmissionRepository;
pub use users::UserRepository;
