//! Registration and login endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use veriscan_core::models::UserResponse;

use crate::auth::service::{authenticate, issue_token, register_user};
use crate::error::HttpAppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: UserResponse,
}

#[tracing::instrument(skip(state, body), fields(operation = "register"))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), HttpAppError> {
    let user = register_user(&state.users, &body.username, &body.password).await?;
    let token = issue_token(&state.config, &user)?;

    tracing::info!(user_id = user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            token,
            user: user.to_response(),
        }),
    ))
}

#[tracing::instrument(skip(state, body), fields(operation = "login"))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, HttpAppError> {
    let user = authenticate(&state.users, &body.username, &body.password).await?;
    let token = issue_token(&state.config, &user)?;

    Ok(Json(AuthResponse {
        success: true,
        token,
        user: user.to_response(),
    }))
}
