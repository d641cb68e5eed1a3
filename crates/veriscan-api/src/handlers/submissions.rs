//! Submission retrieval and deletion. Every query is scoped to the
//! authenticated owner; another user's submission renders as 404.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use veriscan_core::models::{SubmissionDetail, SubmissionListItem};
use veriscan_core::AppError;

use crate::auth::AuthContext;
use crate::error::HttpAppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SubmissionListResponse {
    pub success: bool,
    pub submissions: Vec<SubmissionListItem>,
}

#[derive(Debug, Serialize)]
pub struct SubmissionDetailResponse {
    pub success: bool,
    pub submission: SubmissionDetail,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[tracing::instrument(skip(state), fields(user_id = ctx.user_id, operation = "list_submissions"))]
pub async fn list_submissions(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<Json<SubmissionListResponse>, HttpAppError> {
    let submissions = state.submissions.list_by_user(ctx.user_id).await?;
    Ok(Json(SubmissionListResponse {
        success: true,
        submissions: submissions.iter().map(|s| s.to_list_item()).collect(),
    }))
}

#[tracing::instrument(skip(state), fields(user_id = ctx.user_id, operation = "get_submission"))]
pub async fn get_submission(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<SubmissionDetailResponse>, HttpAppError> {
    let submission = state
        .submissions
        .get_by_id(id, ctx.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

    Ok(Json(SubmissionDetailResponse {
        success: true,
        submission: submission.to_detail(),
    }))
}

#[tracing::instrument(skip(state), fields(user_id = ctx.user_id, operation = "delete_submission"))]
pub async fn delete_submission(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpAppError> {
    if !state.submissions.delete(id, ctx.user_id).await? {
        return Err(AppError::NotFound("Not found".to_string()).into());
    }
    Ok(Json(DeleteResponse { success: true }))
}
