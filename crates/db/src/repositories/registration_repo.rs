//! Repository for the `registrations` table.

use sqlx::PgPool;

use skillforge_core::types::DbId;

use crate::models::registration::{CreateRegistration, Registration, RegistrationStats};

const COLUMNS: &str =
    "id, user_id, training_session_id, registered_at, status, created_at, updated_at";

// Same columns qualified with the `r` alias for the coordinator join.
const ALIASED_COLUMNS: &str = "r.id, r.user_id, r.training_session_id, r.registered_at, \
                               r.status, r.created_at, r.updated_at";

/// Provides CRUD and lifecycle queries for registrations.
pub struct RegistrationRepo;

impl RegistrationRepo {
    /// Insert a new registration with status `pending`.
    ///
    /// The `uq_registrations_user_session` constraint rejects duplicates for
    /// the same (user, session) pair; callers surface that as 409.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRegistration,
    ) -> Result<Registration, sqlx::Error> {
        let query = format!(
            "INSERT INTO registrations (user_id, training_session_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(input.user_id)
            .bind(input.training_session_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Registration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM registrations WHERE id = $1");
        sqlx::query_as::<_, Registration>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all registrations, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Registration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM registrations ORDER BY registered_at DESC");
        sqlx::query_as::<_, Registration>(&query)
            .fetch_all(pool)
            .await
    }

    /// List pending registrations for sessions owned by a coordinator.
    pub async fn list_pending_for_coordinator(
        pool: &PgPool,
        coordinator_id: DbId,
    ) -> Result<Vec<Registration>, sqlx::Error> {
        let query = format!(
            "SELECT {ALIASED_COLUMNS} FROM registrations r
             JOIN training_sessions s ON s.id = r.training_session_id
             WHERE r.status = 'pending' AND s.coordinator_id = $1
             ORDER BY r.registered_at"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(coordinator_id)
            .fetch_all(pool)
            .await
    }

    /// List all registrations for one session.
    pub async fn list_for_session(
        pool: &PgPool,
        session_id: DbId,
    ) -> Result<Vec<Registration>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM registrations
             WHERE training_session_id = $1
             ORDER BY registered_at"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(session_id)
            .fetch_all(pool)
            .await
    }

    /// Platform-wide counts by status.
    pub async fn stats(pool: &PgPool) -> Result<RegistrationStats, sqlx::Error> {
        sqlx::query_as::<_, RegistrationStats>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'confirmed') AS confirmed,
                COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled
             FROM registrations",
        )
        .fetch_one(pool)
        .await
    }

    /// Persist a decided status (`confirmed` or `cancelled`). The transition
    /// itself is validated in core before this is called.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Registration>, sqlx::Error> {
        let query = format!(
            "UPDATE registrations SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a registration (cascades to completion, attendance,
    /// feedback). Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
