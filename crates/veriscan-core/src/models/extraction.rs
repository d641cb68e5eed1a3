use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The eight named attributes the extraction pipeline promotes to typed fields.
/// Every other key returned by the model lands in `additional_fields`.
pub const KNOWN_FIELDS: [&str; 8] = [
    "name",
    "date_of_birth",
    "document_number",
    "document_type",
    "expiry_date",
    "nationality",
    "address",
    "sex",
];

/// Normalized output of reading one identity document.
///
/// Each known field is present-or-absent; an absent field serializes as `null`
/// so the response always carries all eight keys. Constructed once per
/// extraction call and immutable thereafter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub document_number: Option<String>,
    pub document_type: Option<String>,
    pub expiry_date: Option<String>,
    pub nationality: Option<String>,
    pub address: Option<String>,
    pub sex: Option<String>,
    #[serde(default)]
    pub additional_fields: Map<String, Value>,
}

impl ExtractionResult {
    /// Plain-mapping form, the shape stored in the database and returned to
    /// clients. Serialization of this struct cannot fail.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
