//! Training session entity model and DTOs.

use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use skillforge_core::schedule::{self, SessionPhase};
use skillforge_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `training_sessions` table.
///
/// `status` is the persisted archive flag (`active`/`archived`). The
/// time-derived phase is NOT stored here; see [`TrainingSession::phase`] and
/// [`TrainingSessionResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct TrainingSession {
    pub id: DbId,
    pub category_id: DbId,
    pub trainer_id: Option<DbId>,
    pub coordinator_id: DbId,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub max_participants: i32,
    pub skill_name: String,
    pub skill_description: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TrainingSession {
    /// Derived phase at the current instant. Recomputed on every call.
    pub fn phase(&self) -> SessionPhase {
        schedule::phase_at(self.session_date, self.start_time, self.end_time, Utc::now())
    }
}

/// API representation of a session, carrying both status concepts: the
/// persisted `status` and the computed `phase`.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingSessionResponse {
    pub id: DbId,
    pub category_id: DbId,
    pub trainer_id: Option<DbId>,
    pub coordinator_id: DbId,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub max_participants: i32,
    pub skill_name: String,
    pub skill_description: Option<String>,
    pub status: String,
    pub phase: SessionPhase,
    pub created_at: Timestamp,
}

impl From<TrainingSession> for TrainingSessionResponse {
    fn from(s: TrainingSession) -> Self {
        let phase = s.phase();
        TrainingSessionResponse {
            id: s.id,
            category_id: s.category_id,
            trainer_id: s.trainer_id,
            coordinator_id: s.coordinator_id,
            session_date: s.session_date,
            start_time: s.start_time,
            end_time: s.end_time,
            location: s.location,
            max_participants: s.max_participants,
            skill_name: s.skill_name,
            skill_description: s.skill_description,
            status: s.status,
            phase,
            created_at: s.created_at,
        }
    }
}

/// DTO for creating a session.
#[derive(Debug, Deserialize)]
pub struct CreateTrainingSession {
    pub category_id: DbId,
    pub trainer_id: Option<DbId>,
    pub coordinator_id: DbId,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub max_participants: Option<i32>,
    pub skill_name: String,
    pub skill_description: Option<String>,
}

/// DTO for updating a session. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateTrainingSession {
    pub category_id: Option<DbId>,
    pub trainer_id: Option<DbId>,
    pub session_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub max_participants: Option<i32>,
    pub skill_name: Option<String>,
    pub skill_description: Option<String>,
}
