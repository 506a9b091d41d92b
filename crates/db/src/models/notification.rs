//! Notification entity model and DTOs.
//!
//! Notifications are persisted fan-out rows only; no delivery transport.

use serde::{Deserialize, Serialize};
use skillforge_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub priority: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub action_url: Option<String>,
    pub icon: Option<String>,
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a notification for a single user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub priority: Option<String>,
    pub action_url: Option<String>,
    pub icon: Option<String>,
    pub expires_at: Option<Timestamp>,
}
