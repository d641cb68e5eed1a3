//! Test doubles for the extraction seam.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use veriscan_core::models::ExtractionResult;

use crate::client::{DocumentExtractor, ExtractionError};

/// Scripted extractor for integration tests. Outcomes are consumed in FIFO
/// order; once the queue is empty, every call returns the fallback result.
pub struct MockExtractor {
    queued: Mutex<VecDeque<Result<ExtractionResult, String>>>,
    fallback: ExtractionResult,
}

impl Default for MockExtractor {
    fn default() -> Self {
        Self::with_fallback(ExtractionResult {
            name: Some("Jane Doe".to_string()),
            date_of_birth: Some("1990-01-01".to_string()),
            document_type: Some("passport".to_string()),
            ..Default::default()
        })
    }
}

impl MockExtractor {
    pub fn with_fallback(fallback: ExtractionResult) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            fallback,
        }
    }

    pub fn queue_success(&self, result: ExtractionResult) {
        self.queued.lock().expect("mock lock").push_back(Ok(result));
    }

    pub fn queue_failure(&self, cause: &str) {
        self.queued
            .lock()
            .expect("mock lock")
            .push_back(Err(cause.to_string()));
    }
}

#[async_trait]
impl DocumentExtractor for MockExtractor {
    async fn extract(
        &self,
        _image: &[u8],
        _content_type: &str,
    ) -> Result<ExtractionResult, ExtractionError> {
        match self.queued.lock().expect("mock lock").pop_front() {
            Some(Ok(result)) => Ok(result),
            Some(Err(cause)) => Err(ExtractionError::Failed(cause)),
            None => Ok(self.fallback.clone()),
        }
    }
}
