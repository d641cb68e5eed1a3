//! Database setup and initialization

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::time::Duration;
use veriscan_core::Config;
use veriscan_db::init_schema;

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Connect the pool and bootstrap the schema.
pub async fn setup_database(config: &Config) -> Result<SqlitePool> {
    tracing::info!(database_url = %config.database_url, "Connecting to database...");
    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    init_schema(&pool)
        .await
        .context("Failed to initialize database schema")?;

    tracing::info!("Database connected and schema ready");
    Ok(pool)
}
