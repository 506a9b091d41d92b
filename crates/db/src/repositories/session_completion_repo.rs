//! Repository for the `session_completions` table.

use sqlx::PgPool;

use skillforge_core::types::DbId;

use crate::models::session_completion::{
    CreateSessionCompletion, SessionCompletion, UpdateSessionCompletion,
};

const COLUMNS: &str = "id, registration_id, training_session_id, courses_completed, \
                        total_courses, completion_notes, started_at, completed_at, \
                        certificate_issued, certificate_url, status, created_at, updated_at";

/// Provides CRUD and completion-lifecycle operations for session completions.
pub struct SessionCompletionRepo;

impl SessionCompletionRepo {
    /// Insert a new completion record in `in_progress` state.
    ///
    /// The `uq_session_completions_registration` constraint rejects a second
    /// row for the same registration; callers surface that as 409.
    pub async fn create(
        pool: &PgPool,
        training_session_id: DbId,
        input: &CreateSessionCompletion,
    ) -> Result<SessionCompletion, sqlx::Error> {
        let query = format!(
            "INSERT INTO session_completions
                (registration_id, training_session_id, total_courses, completion_notes)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SessionCompletion>(&query)
            .bind(input.registration_id)
            .bind(training_session_id)
            .bind(input.total_courses)
            .bind(&input.completion_notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SessionCompletion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM session_completions WHERE id = $1");
        sqlx::query_as::<_, SessionCompletion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_registration(
        pool: &PgPool,
        registration_id: DbId,
    ) -> Result<Option<SessionCompletion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM session_completions WHERE registration_id = $1");
        sqlx::query_as::<_, SessionCompletion>(&query)
            .bind(registration_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<SessionCompletion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM session_completions ORDER BY started_at DESC");
        sqlx::query_as::<_, SessionCompletion>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update progress fields. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSessionCompletion,
    ) -> Result<Option<SessionCompletion>, sqlx::Error> {
        let query = format!(
            "UPDATE session_completions SET
                courses_completed = COALESCE($2, courses_completed),
                total_courses = COALESCE($3, total_courses),
                completion_notes = COALESCE($4, completion_notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SessionCompletion>(&query)
            .bind(id)
            .bind(input.courses_completed)
            .bind(input.total_courses)
            .bind(input.completion_notes.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Mark a completion finished and record its certificate in one
    /// statement: sets `completed_at`, flips status to `completed`, stores
    /// the certificate URL, and sets `certificate_issued`.
    ///
    /// The `completed_at IS NULL` guard makes the operation idempotent at
    /// the database level: a second call returns `None` and the caller
    /// reports "already marked as completed". A single UPDATE also keeps the
    /// completion flag and the certificate URL atomic.
    pub async fn mark_completed_with_certificate(
        pool: &PgPool,
        id: DbId,
        certificate_url: &str,
    ) -> Result<Option<SessionCompletion>, sqlx::Error> {
        let query = format!(
            "UPDATE session_completions SET
                completed_at = NOW(),
                status = 'completed',
                courses_completed = total_courses,
                certificate_url = $2,
                certificate_issued = TRUE,
                updated_at = NOW()
             WHERE id = $1 AND completed_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SessionCompletion>(&query)
            .bind(id)
            .bind(certificate_url)
            .fetch_optional(pool)
            .await
    }

    /// Record a certificate for an already-finished completion that has no
    /// certificate yet (the `POST /{id}/certificate` path).
    pub async fn issue_certificate(
        pool: &PgPool,
        id: DbId,
        certificate_url: &str,
    ) -> Result<Option<SessionCompletion>, sqlx::Error> {
        let query = format!(
            "UPDATE session_completions SET
                certificate_url = $2,
                certificate_issued = TRUE,
                updated_at = NOW()
             WHERE id = $1 AND certificate_issued = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SessionCompletion>(&query)
            .bind(id)
            .bind(certificate_url)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a completion. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM session_completions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
