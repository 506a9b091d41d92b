//! Password reset token model.

use skillforge_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `password_reset_tokens` table. Stores only the SHA-256
/// hash of the emailed token; `used_at` marks single-use consumption.
#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetToken {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub used_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for issuing a reset token.
#[derive(Debug)]
pub struct CreatePasswordResetToken {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
