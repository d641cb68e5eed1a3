//! Schema bootstrap, run once at startup.

use sqlx::SqlitePool;
use veriscan_core::AppError;

/// Create tables and indexes if they do not exist yet. Idempotent.
#[tracing::instrument(skip(pool))]
pub async fn init_schema(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS submissions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            filename TEXT NOT NULL,
            content_type TEXT NOT NULL,
            extraction_data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            image_data TEXT,
            FOREIGN KEY (user_id) REFERENCES users(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_submissions_user ON submissions(user_id)")
        .execute(pool)
        .await?;

    tracing::info!("database schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::memory_pool;

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let pool = memory_pool().await;
        // memory_pool already ran it once; a second run must not fail.
        init_schema(&pool).await.expect("second init");
    }
}
