//! Repository for the `attendance` table.

use sqlx::PgPool;

use skillforge_core::types::DbId;

use crate::models::attendance::{Attendance, CreateAttendance};

const COLUMNS: &str = "id, registration_id, training_course_id, present, marked_at";

/// Stores per-course attendance marks under a registration.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Mark attendance for a (registration, course) pair. Re-marking the
    /// same pair overwrites the previous value.
    pub async fn mark(
        pool: &PgPool,
        registration_id: DbId,
        input: &CreateAttendance,
    ) -> Result<Attendance, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance (registration_id, training_course_id, present)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_attendance_registration_course
             DO UPDATE SET present = EXCLUDED.present, marked_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(registration_id)
            .bind(input.training_course_id)
            .bind(input.present)
            .fetch_one(pool)
            .await
    }

    /// List attendance marks for one registration.
    pub async fn list_for_registration(
        pool: &PgPool,
        registration_id: DbId,
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance
             WHERE registration_id = $1
             ORDER BY marked_at"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(registration_id)
            .fetch_all(pool)
            .await
    }
}
