//! Fireworks AI client for document extraction
//!
//! One chat-completions round-trip per document: a fixed instruction prompt plus
//! the image as a base64 data-URL. The call either returns a parsed
//! `ExtractionResult` or fails with a single `ExtractionError`; it never
//! partially succeeds. Remote calls are billable, so there is no retry.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use veriscan_core::config::{FIREWORKS_API_BASE, FIREWORKS_MODEL};
use veriscan_core::models::ExtractionResult;
use veriscan_core::{AppError, Config};

use crate::parser::parse_response;

const MAX_TOKENS: u32 = 1024;
const TEMPERATURE: f64 = 0.1;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const MIN_PLAUSIBLE_KEY_LEN: usize = 10;

const PROMPT: &str = r#"Look at this identity document image carefully.

READ THE ACTUAL TEXT visible and extract real information. DO NOT use placeholder data.
If you cannot read a field, use null.

Return JSON only:
{
  "name": "full name on document",
  "date_of_birth": "YYYY-MM-DD format",
  "document_number": "document/license number",
  "document_type": "passport or license",
  "expiry_date": "YYYY-MM-DD or null",
  "nationality": "country or null",
  "address": "address or null",
  "sex": "M or F or null"
}"#;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("FIREWORKS_API_KEY not set")]
    NotConfigured,

    #[error("Extraction failed: {0}")]
    Failed(String),
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        AppError::Extraction(err.to_string())
    }
}

/// Seam for the remote extraction call, so handlers and tests do not depend on
/// the concrete Fireworks transport.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract(
        &self,
        image: &[u8],
        content_type: &str,
    ) -> Result<ExtractionResult, ExtractionError>;
}

// Chat-completions request/response envelope (OpenAI-compatible)

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Production extractor backed by the Fireworks chat-completions API.
pub struct FireworksClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
    api_base: String,
}

impl FireworksClient {
    pub fn new(config: &Config) -> Result<Self, anyhow::Error> {
        Self::with_api_base(config, FIREWORKS_API_BASE)
    }

    /// Point the client at a different endpoint; used by tests to stand in a
    /// local server.
    pub fn with_api_base(config: &Config, api_base: &str) -> Result<Self, anyhow::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.fireworks_api_key.clone(),
            api_base: api_base.to_string(),
        })
    }

    fn data_url(image: &[u8], content_type: &str) -> String {
        let b64 = base64::engine::general_purpose::STANDARD.encode(image);
        format!("data:{};base64,{}", content_type, b64)
    }
}

#[async_trait]
impl DocumentExtractor for FireworksClient {
    #[tracing::instrument(skip(self, image), fields(image_size = image.len(), content_type))]
    async fn extract(
        &self,
        image: &[u8],
        content_type: &str,
    ) -> Result<ExtractionResult, ExtractionError> {
        let api_key = self.api_key.as_deref().ok_or(ExtractionError::NotConfigured)?;

        let body = ChatRequest {
            model: FIREWORKS_MODEL.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: PROMPT.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: Self::data_url(image, content_type),
                        },
                    },
                ],
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExtractionError::Failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ExtractionError::Failed(format!(
                "API request failed: {} - {}",
                status, error_text
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::Failed(format!("malformed response: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content);

        tracing::debug!(got_content = content.is_some(), "model reply received");

        // A syntactically broken reply is not a failure; the parser degrades.
        Ok(parse_response(content.as_deref()))
    }
}

/// Lightweight health probe: reports whether the credential looks usable
/// without making a network call.
pub fn check_api(config: &Config) -> (bool, String) {
    match config.fireworks_api_key.as_deref() {
        None => (false, "FIREWORKS_API_KEY not set".to_string()),
        Some(key) if key.len() < MIN_PLAUSIBLE_KEY_LEN => {
            (false, "API key appears invalid".to_string())
        }
        Some(_) => (true, "OK".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> Config {
        Config {
            fireworks_api_key: key.map(str::to_string),
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiry_hours: 24,
            server_port: 0,
            environment: "development".to_string(),
        }
    }

    #[test]
    fn test_check_api_unset_key() {
        let (ok, msg) = check_api(&config_with_key(None));
        assert!(!ok);
        assert_eq!(msg, "FIREWORKS_API_KEY not set");
    }

    #[test]
    fn test_check_api_short_key_flagged_invalid() {
        let (ok, msg) = check_api(&config_with_key(Some("short")));
        assert!(!ok);
        assert_eq!(msg, "API key appears invalid");
    }

    #[test]
    fn test_check_api_plausible_key() {
        let (ok, msg) = check_api(&config_with_key(Some("fw-0123456789abcdef")));
        assert!(ok);
        assert_eq!(msg, "OK");
    }

    #[tokio::test]
    async fn test_extract_without_credential_fails_immediately() {
        let client = FireworksClient::new(&config_with_key(None)).expect("client");
        let err = client.extract(b"bytes", "image/jpeg").await.unwrap_err();
        assert!(matches!(err, ExtractionError::NotConfigured));
        assert_eq!(err.to_string(), "FIREWORKS_API_KEY not set");
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: FIREWORKS_MODEL.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: PROMPT.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: FireworksClient::data_url(b"abc", "image/png"),
                        },
                    },
                ],
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["max_tokens"], 1024);
        assert_eq!(json["messages"][0]["content"][0]["type"], "text");
        assert_eq!(json["messages"][0]["content"][1]["type"], "image_url");
        assert_eq!(
            json["messages"][0]["content"][1]["image_url"]["url"],
            "data:image/png;base64,YWJj"
        );
    }
}
