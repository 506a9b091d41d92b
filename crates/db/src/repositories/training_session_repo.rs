//! Repository for the `training_sessions` table.

use sqlx::PgPool;

use skillforge_core::types::DbId;

use crate::models::training_session::{
    CreateTrainingSession, TrainingSession, UpdateTrainingSession,
};

const COLUMNS: &str = "id, category_id, trainer_id, coordinator_id, session_date, start_time, \
                        end_time, location, max_participants, skill_name, skill_description, \
                        status, created_at, updated_at";

/// Default cap on participants when the creator does not supply one.
const DEFAULT_MAX_PARTICIPANTS: i32 = 20;

/// Provides CRUD operations for training sessions.
pub struct TrainingSessionRepo;

impl TrainingSessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTrainingSession,
    ) -> Result<TrainingSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO training_sessions
                (category_id, trainer_id, coordinator_id, session_date, start_time, end_time,
                 location, max_participants, skill_name, skill_description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingSession>(&query)
            .bind(input.category_id)
            .bind(input.trainer_id)
            .bind(input.coordinator_id)
            .bind(input.session_date)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.location)
            .bind(input.max_participants.unwrap_or(DEFAULT_MAX_PARTICIPANTS))
            .bind(&input.skill_name)
            .bind(&input.skill_description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TrainingSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM training_sessions WHERE id = $1");
        sqlx::query_as::<_, TrainingSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List sessions, optionally including archived ones.
    pub async fn list(
        pool: &PgPool,
        include_archived: bool,
    ) -> Result<Vec<TrainingSession>, sqlx::Error> {
        let query = if include_archived {
            format!(
                "SELECT {COLUMNS} FROM training_sessions
                 ORDER BY session_date DESC, start_time DESC"
            )
        } else {
            format!(
                "SELECT {COLUMNS} FROM training_sessions WHERE status = 'active'
                 ORDER BY session_date DESC, start_time DESC"
            )
        };
        sqlx::query_as::<_, TrainingSession>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a session. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTrainingSession,
    ) -> Result<Option<TrainingSession>, sqlx::Error> {
        let query = format!(
            "UPDATE training_sessions SET
                category_id = COALESCE($2, category_id),
                trainer_id = COALESCE($3, trainer_id),
                session_date = COALESCE($4, session_date),
                start_time = COALESCE($5, start_time),
                end_time = COALESCE($6, end_time),
                location = COALESCE($7, location),
                max_participants = COALESCE($8, max_participants),
                skill_name = COALESCE($9, skill_name),
                skill_description = COALESCE($10, skill_description),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingSession>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(input.trainer_id)
            .bind(input.session_date)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.location)
            .bind(input.max_participants)
            .bind(&input.skill_name)
            .bind(&input.skill_description)
            .fetch_optional(pool)
            .await
    }

    /// Flip the persisted status to `archived`. Returns the updated row, or
    /// `None` if the session does not exist.
    pub async fn archive(pool: &PgPool, id: DbId) -> Result<Option<TrainingSession>, sqlx::Error> {
        let query = format!(
            "UPDATE training_sessions SET status = 'archived', updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a session (cascades to registrations and children).
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM training_sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
