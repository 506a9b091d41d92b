//! Repository for the `auth_sessions` table (refresh-token sessions).

use sqlx::PgPool;

use skillforge_core::types::DbId;

use crate::models::auth_session::{AuthSession, CreateAuthSession};

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, revoked_at, created_at";

/// Stores and revokes refresh-token sessions.
pub struct AuthSessionRepo;

impl AuthSessionRepo {
    /// Insert a new session row at login or token refresh.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAuthSession,
    ) -> Result<AuthSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO auth_sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuthSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an active (not revoked, not expired) session by token hash.
    pub async fn find_active_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<AuthSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM auth_sessions
             WHERE refresh_token_hash = $1
               AND revoked_at IS NULL
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, AuthSession>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single session (token rotation).
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE auth_sessions SET revoked_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Revoke all sessions for a user (logout everywhere).
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE auth_sessions SET revoked_at = NOW()
             WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
