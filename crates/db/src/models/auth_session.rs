//! Refresh-token session model.

use skillforge_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `auth_sessions` table. One row per issued refresh token;
/// only the SHA-256 hash of the token is stored.
#[derive(Debug, Clone, FromRow)]
pub struct AuthSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a session at login/refresh.
#[derive(Debug)]
pub struct CreateAuthSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
