use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// A persisted record of one extraction, owned by one user. Immutable once
/// created except for deletion by its owner.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub id: i64,
    pub user_id: i64,
    pub filename: String,
    pub content_type: String,
    /// The ExtractionResult as a plain mapping; stored as JSON text and decoded
    /// transparently on read, so it round-trips without loss.
    pub extraction_data: Value,
    pub created_at: DateTime<Utc>,
    /// Data-URL of the original upload, when captured.
    pub image_data: Option<String>,
}

/// Full projection returned by `GET /submissions/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionDetail {
    pub id: i64,
    pub filename: String,
    pub extraction_data: Value,
    pub created_at: DateTime<Utc>,
    pub image_data: Option<String>,
}

/// Compact projection returned by `GET /submissions`, with the two headline
/// fields pulled out of the extraction payload.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionListItem {
    pub id: i64,
    pub filename: String,
    pub document_type: Option<String>,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    pub fn to_detail(&self) -> SubmissionDetail {
        SubmissionDetail {
            id: self.id,
            filename: self.filename.clone(),
            extraction_data: self.extraction_data.clone(),
            created_at: self.created_at,
            image_data: self.image_data.clone(),
        }
    }

    pub fn to_list_item(&self) -> SubmissionListItem {
        let field = |key: &str| {
            self.extraction_data
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        SubmissionListItem {
            id: self.id,
            filename: self.filename.clone(),
            document_type: field("document_type"),
            name: field("name"),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Submission {
        Submission {
            id: 7,
            user_id: 1,
            filename: "passport.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            extraction_data: json!({
                "name": "Jane Doe",
                "document_type": "passport",
                "nationality": null,
            }),
            created_at: Utc::now(),
            image_data: None,
        }
    }

    #[test]
    fn test_list_item_pulls_headline_fields() {
        let item = sample().to_list_item();
        assert_eq!(item.name.as_deref(), Some("Jane Doe"));
        assert_eq!(item.document_type.as_deref(), Some("passport"));
        assert_eq!(item.id, 7);
    }

    #[test]
    fn test_list_item_tolerates_null_fields() {
        let mut submission = sample();
        submission.extraction_data = json!({"nationality": null});
        let item = submission.to_list_item();
        assert!(item.name.is_none());
        assert!(item.document_type.is_none());
    }

    #[test]
    fn test_detail_omits_owner_id() {
        let value = serde_json::to_value(sample().to_detail()).expect("serialize");
        assert!(value.get("user_id").is_none());
        assert!(value.get("extraction_data").is_some());
    }
}
