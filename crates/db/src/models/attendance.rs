//! Attendance entity model and DTOs.

use serde::{Deserialize, Serialize};
use skillforge_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `attendance` table. Child of a registration, one per
/// course.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attendance {
    pub id: DbId,
    pub registration_id: DbId,
    pub training_course_id: DbId,
    pub present: bool,
    pub marked_at: Timestamp,
}

/// DTO for marking attendance.
#[derive(Debug, Deserialize)]
pub struct CreateAttendance {
    pub training_course_id: DbId,
    pub present: bool,
}
