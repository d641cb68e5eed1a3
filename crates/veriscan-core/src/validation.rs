//! Upload validation
//!
//! Validation logic for uploaded document images, decoupled from the transport
//! layer. Checks run in size -> content type -> extension order and the first
//! failure wins.

/// Maximum accepted upload size: 10 MiB.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Content types the extraction pipeline accepts, compared case-insensitively.
pub const ALLOWED_CONTENT_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Filename extensions the extraction pipeline accepts, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Validation errors for uploaded files. Display strings are the user-facing
/// rejection reasons.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("File exceeds 10MB limit")]
    FileTooLarge(usize),

    #[error("Invalid file type. Use JPEG, PNG, GIF, or WebP.")]
    InvalidContentType(String),

    #[error("Invalid file extension.")]
    InvalidExtension(String),
}

/// Validate an upload's size, declared content type, and filename extension.
///
/// The extension check only applies when the filename contains a `.`; everything
/// after the last dot is compared, so `a.b.png` is checked as `png`. A dot-free
/// filename passes the extension check unconditionally.
pub fn validate_upload(
    filename: &str,
    content_type: &str,
    size: usize,
) -> Result<(), ValidationError> {
    if size > MAX_FILE_SIZE {
        return Err(ValidationError::FileTooLarge(size));
    }

    let normalized = content_type.to_lowercase();
    if !ALLOWED_CONTENT_TYPES.contains(&normalized.as_str()) {
        return Err(ValidationError::InvalidContentType(normalized));
    }

    if let Some((_, ext)) = filename.rsplit_once('.') {
        let ext = ext.to_lowercase();
        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ValidationError::InvalidExtension(ext));
        }
    }

    Ok(())
}
