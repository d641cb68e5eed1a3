//! Application setup and initialization, kept out of main.rs so integration
//! tests can assemble the same router with test collaborators.

pub mod database;
pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::Result;
use veriscan_core::Config;
use veriscan_db::{SubmissionRepository, UserRepository};
use veriscan_extraction::FireworksClient;

use crate::state::AppState;

/// Initialize the entire application: database, state, routes.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let pool = database::setup_database(&config).await?;

    let extractor = Arc::new(FireworksClient::new(&config)?);
    let state = Arc::new(AppState {
        users: UserRepository::new(pool.clone()),
        submissions: SubmissionRepository::new(pool),
        extractor,
        config,
    });

    let router = routes::build_router(state.clone());
    Ok((state, router))
}
