use base64::Engine;
use bytes::Bytes;

use crate::validation::{validate_upload, ValidationError};

/// A single in-memory upload. Raw bytes live only for the duration of the
/// request; only the derived data-URL is ever persisted.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl UploadedFile {
    /// Build an upload from multipart parts. A missing content type from the
    /// transport defaults to `application/octet-stream`, which the validator
    /// will reject.
    pub fn new(filename: String, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            filename,
            content_type: content_type
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            data,
        }
    }

    /// Validate size, content type, and filename extension. Pure function of
    /// state; never panics.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_upload(&self.filename, &self.content_type, self.data.len())
    }

    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    /// `data:<content_type>;base64,<payload>` form sent to the model and stored
    /// alongside the submission.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, self.to_base64())
    }
}
