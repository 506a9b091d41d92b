//! Repository for the `feedback` table.

use sqlx::PgPool;

use skillforge_core::types::DbId;

use crate::models::feedback::{CreateFeedback, Feedback};

const COLUMNS: &str = "id, registration_id, rating, comment, created_at";

/// Stores trainee feedback under a registration.
pub struct FeedbackRepo;

impl FeedbackRepo {
    /// Insert a feedback row. The session cross-check happens in the
    /// handler before this is called.
    pub async fn create(pool: &PgPool, input: &CreateFeedback) -> Result<Feedback, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedback (registration_id, rating, comment)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(input.registration_id)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// List feedback for one registration, newest first.
    pub async fn list_for_registration(
        pool: &PgPool,
        registration_id: DbId,
    ) -> Result<Vec<Feedback>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM feedback
             WHERE registration_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(registration_id)
            .fetch_all(pool)
            .await
    }
}
