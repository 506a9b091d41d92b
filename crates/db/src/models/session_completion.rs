//! Session completion entity model and DTOs.

use serde::{Deserialize, Serialize};
use skillforge_core::completion;
use skillforge_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `session_completions` table. One per registration.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SessionCompletion {
    pub id: DbId,
    pub registration_id: DbId,
    pub training_session_id: DbId,
    pub courses_completed: i32,
    pub total_courses: i32,
    pub completion_notes: Option<String>,
    pub started_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub certificate_issued: bool,
    pub certificate_url: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SessionCompletion {
    /// Finished iff `completed_at` is set.
    pub fn is_completed(&self) -> bool {
        completion::is_completed(self.completed_at)
    }

    /// Whether the certificate pipeline still has to run for this row.
    pub fn certificate_due(&self) -> bool {
        completion::certificate_due(self.completed_at, self.certificate_issued)
    }
}

/// DTO for creating a completion record when a trainee starts working
/// through a confirmed registration.
#[derive(Debug, Deserialize)]
pub struct CreateSessionCompletion {
    pub registration_id: DbId,
    pub total_courses: i32,
    pub completion_notes: Option<String>,
}

/// DTO for updating progress on a completion. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateSessionCompletion {
    pub courses_completed: Option<i32>,
    pub total_courses: Option<i32>,
    pub completion_notes: Option<String>,
}
