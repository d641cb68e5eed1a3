//! Shared application state.

use std::sync::Arc;

use veriscan_core::Config;
use veriscan_db::{SubmissionRepository, UserRepository};
use veriscan_extraction::DocumentExtractor;

/// Process-wide state handed to every handler. Everything here is established
/// once at startup and read-only thereafter.
pub struct AppState {
    pub config: Config,
    pub users: UserRepository,
    pub submissions: SubmissionRepository,
    pub extractor: Arc<dyn DocumentExtractor>,
}
