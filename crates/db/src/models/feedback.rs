//! Feedback entity model and DTOs.

use serde::{Deserialize, Serialize};
use skillforge_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `feedback` table. Child of a registration.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: DbId,
    pub registration_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for submitting feedback. `training_session_id` is cross-checked
/// against the registration's session in the handler.
#[derive(Debug, Deserialize)]
pub struct CreateFeedback {
    pub registration_id: DbId,
    pub training_session_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
}
