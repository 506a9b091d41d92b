//! Registration entity model and DTOs.

use serde::{Deserialize, Serialize};
use skillforge_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `registrations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Registration {
    pub id: DbId,
    pub user_id: DbId,
    pub training_session_id: DbId,
    pub registered_at: Timestamp,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a registration. Status always starts as `pending`.
#[derive(Debug, Deserialize)]
pub struct CreateRegistration {
    pub user_id: DbId,
    pub training_session_id: DbId,
}

/// Counts of registrations grouped by lifecycle status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RegistrationStats {
    pub total: i64,
    pub pending: i64,
    pub confirmed: i64,
    pub cancelled: i64,
}
