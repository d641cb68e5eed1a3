//! Domain models shared across Veriscan components.

mod extraction;
mod submission;
mod upload;
mod user;

pub use extraction::{ExtractionResult, KNOWN_FIELDS};
pub use submission::{Submission, SubmissionDetail, SubmissionListItem};
pub use upload::UploadedFile;
pub use user::{User, UserResponse};
