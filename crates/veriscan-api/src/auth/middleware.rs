//! Bearer-token middleware guarding the protected routes.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use veriscan_core::AppError;

use super::models::AuthContext;
use super::service::decode_token;
use crate::error::HttpAppError;
use crate::state::AppState;

/// Resolve `Authorization: Bearer <token>` to an [`AuthContext`] and insert it
/// into request extensions. The user must still exist; a token for a deleted
/// account is rejected.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return unauthorized("Missing authorization header");
    };

    let claims = match decode_token(&state.config, token) {
        Ok(claims) => claims,
        Err(err) => return HttpAppError(err).into_response(),
    };

    let user = match state.users.get_by_id(claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => return unauthorized("Unknown user"),
        Err(err) => return HttpAppError(err).into_response(),
    };

    request.extensions_mut().insert(AuthContext {
        user_id: user.id,
        username: user.username,
    });

    next.run(request).await
}

fn unauthorized(message: &str) -> Response {
    HttpAppError(AppError::Unauthorized(message.to_string())).into_response()
}
