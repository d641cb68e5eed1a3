use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::SqlitePool;
use veriscan_core::models::Submission;
use veriscan_core::AppError;

/// Raw row shape; `extraction_data` is JSON text until decoded.
#[derive(Debug, sqlx::FromRow)]
struct SubmissionRow {
    id: i64,
    user_id: i64,
    filename: String,
    content_type: String,
    extraction_data: String,
    created_at: DateTime<Utc>,
    image_data: Option<String>,
}

impl SubmissionRow {
    fn into_submission(self) -> Result<Submission, AppError> {
        let extraction_data: Value = serde_json::from_str(&self.extraction_data)
            .map_err(|e| {
                AppError::Internal(format!(
                    "stored extraction_data for submission {} is not valid JSON: {}",
                    self.id, e
                ))
            })?;
        Ok(Submission {
            id: self.id,
            user_id: self.user_id,
            filename: self.filename,
            content_type: self.content_type,
            extraction_data,
            created_at: self.created_at,
            image_data: self.image_data,
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, user_id, filename, content_type, extraction_data, created_at, image_data";

/// Repository for persisted extraction records. Every read is scoped by owner:
/// a submission belonging to another user is indistinguishable from one that
/// does not exist.
#[derive(Clone)]
pub struct SubmissionRepository {
    pool: SqlitePool,
}

impl SubmissionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(
        skip(self, extraction_data, image_data),
        fields(db.table = "submissions", db.operation = "insert")
    )]
    pub async fn create(
        &self,
        user_id: i64,
        filename: &str,
        content_type: &str,
        extraction_data: &Value,
        image_data: Option<&str>,
    ) -> Result<Submission, AppError> {
        let encoded = serde_json::to_string(extraction_data)?;

        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            r#"
            INSERT INTO submissions (user_id, filename, content_type, extraction_data, created_at, image_data)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING {SELECT_COLUMNS}
            "#,
        ))
        .bind(user_id)
        .bind(filename)
        .bind(content_type)
        .bind(encoded)
        .bind(Utc::now())
        .bind(image_data)
        .fetch_one(&self.pool)
        .await?;

        row.into_submission()
    }

    /// All submissions for one user, most recent first. Ties on timestamp are
    /// broken by id so ordering stays stable within a burst of inserts.
    #[tracing::instrument(skip(self), fields(db.table = "submissions", db.operation = "select"))]
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Submission>, AppError> {
        let rows = sqlx::query_as::<_, SubmissionRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM submissions WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SubmissionRow::into_submission).collect()
    }

    #[tracing::instrument(
        skip(self),
        fields(db.table = "submissions", db.operation = "select", db.record_id = id)
    )]
    pub async fn get_by_id(&self, id: i64, user_id: i64) -> Result<Option<Submission>, AppError> {
        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM submissions WHERE id = ?1 AND user_id = ?2",
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(SubmissionRow::into_submission).transpose()
    }

    /// Returns true only when a row owned by `user_id` was removed.
    #[tracing::instrument(
        skip(self),
        fields(db.table = "submissions", db.operation = "delete", db.record_id = id)
    )]
    pub async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::memory_pool;
    use crate::users::UserRepository;
    use serde_json::json;

    async fn setup() -> (UserRepository, SubmissionRepository) {
        let pool = memory_pool().await;
        (
            UserRepository::new(pool.clone()),
            SubmissionRepository::new(pool),
        )
    }

    fn sample_extraction() -> Value {
        json!({
            "name": "Jane Doe",
            "date_of_birth": "1990-01-01",
            "document_number": "X123",
            "document_type": "passport",
            "expiry_date": null,
            "nationality": "USA",
            "address": null,
            "sex": "F",
            "additional_fields": {"issuing_office": "St. Paul"}
        })
    }

    #[tokio::test]
    async fn test_extraction_data_round_trips_losslessly() {
        let (users, submissions) = setup().await;
        let user = users.create("alice", "hash").await.expect("user");

        let data = sample_extraction();
        let created = submissions
            .create(user.id, "passport.jpg", "image/jpeg", &data, Some("data:image/jpeg;base64,YWJj"))
            .await
            .expect("create");

        assert_eq!(created.extraction_data, data);

        let fetched = submissions
            .get_by_id(created.id, user.id)
            .await
            .expect("query")
            .expect("present");
        assert_eq!(fetched.extraction_data, data);
        assert_eq!(fetched.image_data.as_deref(), Some("data:image/jpeg;base64,YWJj"));
    }

    #[tokio::test]
    async fn test_list_is_most_recent_first() {
        let (users, submissions) = setup().await;
        let user = users.create("bob", "hash").await.expect("user");

        for i in 0..3 {
            submissions
                .create(user.id, &format!("doc{i}.png"), "image/png", &json!({}), None)
                .await
                .expect("create");
        }

        let listed = submissions.list_by_user(user.id).await.expect("list");
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].filename, "doc2.png");
        assert_eq!(listed[2].filename, "doc0.png");
    }

    #[tokio::test]
    async fn test_non_owner_sees_absent() {
        let (users, submissions) = setup().await;
        let owner = users.create("owner", "hash").await.expect("user");
        let other = users.create("other", "hash").await.expect("user");

        let created = submissions
            .create(owner.id, "id.png", "image/png", &json!({"name": "A"}), None)
            .await
            .expect("create");

        assert!(submissions
            .get_by_id(created.id, other.id)
            .await
            .expect("query")
            .is_none());
        assert!(!submissions.delete(created.id, other.id).await.expect("delete"));

        // Still present for the owner after the foreign delete attempt.
        assert!(submissions
            .get_by_id(created.id, owner.id)
            .await
            .expect("query")
            .is_some());
    }

    #[tokio::test]
    async fn test_owner_delete_removes_row() {
        let (users, submissions) = setup().await;
        let user = users.create("carol", "hash").await.expect("user");
        let created = submissions
            .create(user.id, "id.png", "image/png", &json!({}), None)
            .await
            .expect("create");

        assert!(submissions.delete(created.id, user.id).await.expect("delete"));
        assert!(!submissions.delete(created.id, user.id).await.expect("delete again"));
        assert!(submissions
            .get_by_id(created.id, user.id)
            .await
            .expect("query")
            .is_none());
    }
}
