//! Document upload and extraction orchestration.
//!
//! Flow: multipart field -> validator -> extraction client -> submission store.
//! Bulk upload processes files sequentially and isolates failures per file: one
//! file's rejection never aborts its siblings.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use veriscan_core::models::UploadedFile;
use veriscan_core::AppError;

use crate::auth::AuthContext;
use crate::error::HttpAppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub data: Value,
    pub image_data: String,
}

#[derive(Debug, Serialize)]
pub struct BulkUploadResponse {
    pub success: bool,
    pub results: Vec<FileResult>,
    pub summary: BulkSummary,
}

#[derive(Debug, Serialize)]
pub struct BulkSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Per-file outcome within a bulk upload.
#[derive(Debug, Serialize)]
pub struct FileResult {
    pub filename: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<i64>,
}

impl FileResult {
    fn failure(filename: &str, error: String) -> Self {
        Self {
            filename: filename.to_string(),
            success: false,
            data: None,
            error: Some(error),
            submission_id: None,
        }
    }
}

fn invalid_multipart(err: axum::extract::multipart::MultipartError) -> HttpAppError {
    HttpAppError(AppError::InvalidInput(format!(
        "Invalid multipart body: {}",
        err
    )))
}

/// Pull the next multipart part matching `field_name` into an UploadedFile,
/// skipping unrelated parts.
async fn next_upload(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<Option<UploadedFile>, HttpAppError> {
    while let Some(field) = multipart.next_field().await.map_err(invalid_multipart)? {
        if field.name() != Some(field_name) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(invalid_multipart)?;
        return Ok(Some(UploadedFile::new(filename, content_type, data)));
    }
    Ok(None)
}

/// Handle a single document upload: validate, extract, persist, respond with
/// the extraction payload and the data-URL echo of the image.
#[tracing::instrument(skip(state, multipart), fields(user_id = ctx.user_id, operation = "upload"))]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let file = next_upload(&mut multipart, "file")
        .await?
        .filter(|f| !f.filename.is_empty())
        .ok_or_else(|| AppError::InvalidInput("No file uploaded".to_string()))?;

    file.validate().map_err(AppError::from)?;

    let result = state
        .extractor
        .extract(&file.data, &file.content_type)
        .await
        .map_err(AppError::from)?;

    let data = result.to_value();
    let image_data = file.to_data_url();

    let submission = state
        .submissions
        .create(
            ctx.user_id,
            &file.filename,
            &file.content_type,
            &data,
            Some(&image_data),
        )
        .await?;

    tracing::info!(submission_id = submission.id, "document extracted and stored");

    Ok(Json(UploadResponse {
        success: true,
        data,
        image_data,
    }))
}

/// Handle a bulk upload of repeated `files[]` parts. Files are processed
/// sequentially; each entry in `results` reports its own outcome.
#[tracing::instrument(skip(state, multipart), fields(user_id = ctx.user_id, operation = "upload_bulk"))]
pub async fn upload_bulk(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    mut multipart: Multipart,
) -> Result<Json<BulkUploadResponse>, HttpAppError> {
    let mut files = Vec::new();
    while let Some(file) = next_upload(&mut multipart, "files[]").await? {
        files.push(file);
    }

    if files.is_empty() {
        return Err(AppError::InvalidInput("No files uploaded".to_string()).into());
    }

    // Parts with no filename (empty form slots) are skipped, not failed.
    files.retain(|f| !f.filename.is_empty());
    if files.is_empty() {
        return Err(AppError::InvalidInput("No files selected".to_string()).into());
    }

    let mut results = Vec::with_capacity(files.len());
    for file in &files {
        results.push(process_file(&state, ctx.user_id, file).await);
    }

    let succeeded = results.iter().filter(|r| r.success).count();
    let summary = BulkSummary {
        total: results.len(),
        succeeded,
        failed: results.len() - succeeded,
    };

    tracing::info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "bulk upload finished"
    );

    Ok(Json(BulkUploadResponse {
        success: true,
        results,
        summary,
    }))
}

/// Run one file through the validate -> extract -> persist pipeline, capturing
/// any failure as this file's result entry.
async fn process_file(state: &AppState, user_id: i64, file: &UploadedFile) -> FileResult {
    if let Err(err) = file.validate() {
        return FileResult::failure(&file.filename, err.to_string());
    }

    let result = match state.extractor.extract(&file.data, &file.content_type).await {
        Ok(result) => result,
        Err(err) => return FileResult::failure(&file.filename, err.to_string()),
    };

    let data = result.to_value();
    let submission = match state
        .submissions
        .create(
            user_id,
            &file.filename,
            &file.content_type,
            &data,
            Some(&file.to_data_url()),
        )
        .await
    {
        Ok(submission) => submission,
        Err(err) => return FileResult::failure(&file.filename, err.client_message()),
    };

    FileResult {
        filename: file.filename.clone(),
        success: true,
        data: Some(data),
        error: None,
        submission_id: Some(submission.id),
    }
}
