//! Repository for the `password_reset_tokens` table.

use sqlx::PgPool;

use skillforge_core::types::DbId;

use crate::models::password_reset::{CreatePasswordResetToken, PasswordResetToken};

const COLUMNS: &str = "id, user_id, token_hash, expires_at, used_at, created_at";

/// Stores single-use password reset tokens (hashed).
pub struct PasswordResetRepo;

impl PasswordResetRepo {
    /// Insert a new reset token row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePasswordResetToken,
    ) -> Result<PasswordResetToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO password_reset_tokens (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PasswordResetToken>(&query)
            .bind(input.user_id)
            .bind(&input.token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a token that is still valid: unused and not expired.
    pub async fn find_valid_by_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<PasswordResetToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM password_reset_tokens
             WHERE token_hash = $1
               AND used_at IS NULL
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, PasswordResetToken>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Mark a token as consumed.
    pub async fn mark_used(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE password_reset_tokens SET used_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
