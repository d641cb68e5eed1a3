//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. `AppError` (and
//! types convertible into it) becomes `HttpAppError` via `?` so every error
//! renders consistently: status code, `{success:false, error}` body, logging.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use veriscan_core::{AppError, LogLevel, ValidationError};
use veriscan_extraction::ExtractionError;

/// Uniform error body: `{"success": false, "error": "..."}`. Non-production
/// builds add a `details` field for sensitive errors whose client message was
/// sanitized.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: None,
        }
    }
}

/// Wrapper for AppError to implement IntoResponse. Needed because of the orphan
/// rule: IntoResponse (axum) cannot be implemented for AppError (veriscan-core)
/// here otherwise.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        HttpAppError(err.into())
    }
}

impl From<ExtractionError> for HttpAppError {
    fn from(err: ExtractionError) -> Self {
        HttpAppError(err.into())
    }
}

fn log_error(error: &AppError) {
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, code = error.error_code(), "request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, code = error.error_code(), "request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, code = error.error_code(), "request failed");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .map(|env| {
            let env = env.to_lowercase();
            env == "production" || env == "prod"
        })
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let mut body = ErrorBody::new(app_error.client_message());
        if app_error.is_sensitive() && !is_production_env() {
            body.details = Some(app_error.to_string());
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_converts_to_400() {
        let HttpAppError(app) = ValidationError::FileTooLarge(11 * 1024 * 1024).into();
        assert_eq!(app.http_status_code(), 400);
        assert_eq!(app.client_message(), "File exceeds 10MB limit");
    }

    #[test]
    fn test_extraction_error_converts_to_500() {
        let HttpAppError(app) = ExtractionError::Failed("timed out".to_string()).into();
        assert_eq!(app.http_status_code(), 500);
        assert_eq!(app.client_message(), "Extraction failed: timed out");
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody::new("Not found");
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Not found");
        assert!(json.get("details").is_none());
    }
}
