//! Model response parsing
//!
//! The remote model is asked for a bare JSON object but often wraps it in prose
//! or code fences. Recovery scans for the first single-level brace-delimited
//! object; an object containing nested braces is matched at its innermost
//! level, so fields outside the innermost object are lost rather than erroring.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use veriscan_core::models::{ExtractionResult, KNOWN_FIELDS};

/// First `{...}` run containing no nested braces, matched across line breaks.
static EMBEDDED_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{[^{}]*\}").expect("embedded object pattern"));

/// Truthiness of a JSON value: null, false, 0, "" and empty containers are
/// falsy. Falsy extra values are dropped rather than copied to
/// `additional_fields`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Normalize a raw model reply into an [`ExtractionResult`]. Never fails: an
/// absent, empty, or undecodable reply yields the all-absent result.
pub fn parse_response(text: Option<&str>) -> ExtractionResult {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return ExtractionResult::default();
    };

    let candidate = EMBEDDED_OBJECT
        .find(text)
        .map(|m| m.as_str())
        .unwrap_or(text);

    let Ok(mut data) = serde_json::from_str::<Map<String, Value>>(candidate) else {
        tracing::debug!("model reply did not decode as a JSON object");
        return ExtractionResult::default();
    };

    let mut field = |key: &str| {
        data.remove(key)
            .and_then(|v| v.as_str().map(str::to_string))
    };

    let mut result = ExtractionResult {
        name: field("name"),
        date_of_birth: field("date_of_birth"),
        document_number: field("document_number"),
        document_type: field("document_type"),
        expiry_date: field("expiry_date"),
        nationality: field("nationality"),
        address: field("address"),
        sex: field("sex"),
        additional_fields: Map::new(),
    };

    debug_assert!(KNOWN_FIELDS.iter().all(|k| !data.contains_key(*k)));
    result.additional_fields = data.into_iter().filter(|(_, v)| is_truthy(v)).collect();

    result
}
