use chrono::{DateTime, Utc};
use serde::Serialize;

/// Credential holder and ownership anchor for submissions.
///
/// `password_hash` is an argon2 PHC string and never serialized to clients.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Public projection of a user for auth responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
}

impl User {
    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.id,
            username: self.username.clone(),
        }
    }
}
