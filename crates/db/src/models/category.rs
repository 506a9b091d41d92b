//! Category and course catalog models (reference data).

use serde::{Deserialize, Serialize};
use skillforge_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a category (seed data and tests).
#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub description: Option<String>,
}

/// A row from the `training_courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainingCourse {
    pub id: DbId,
    pub category_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a course (seed data and tests).
#[derive(Debug, Deserialize)]
pub struct CreateTrainingCourse {
    pub category_id: DbId,
    pub title: String,
    pub description: Option<String>,
}
