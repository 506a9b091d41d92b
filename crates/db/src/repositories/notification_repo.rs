//! Repository for the `notifications` table.

use sqlx::PgPool;

use skillforge_core::types::DbId;

use crate::models::notification::{CreateNotification, Notification};

const COLUMNS: &str = "id, user_id, notification_type, title, message, data, priority, \
                        is_read, read_at, action_url, icon, expires_at, created_at";

/// Default priority when the creator does not supply one.
const DEFAULT_PRIORITY: &str = "normal";

/// Persisted fan-out notification rows. No delivery transport.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification for a single user.
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications
                (user_id, notification_type, title, message, data, priority,
                 action_url, icon, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(input.user_id)
            .bind(&input.notification_type)
            .bind(&input.title)
            .bind(&input.message)
            .bind(&input.data)
            .bind(input.priority.as_deref().unwrap_or(DEFAULT_PRIORITY))
            .bind(&input.action_url)
            .bind(&input.icon)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// List a user's notifications, newest first. Expired rows are skipped.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let unread_filter = if unread_only {
            "AND is_read = FALSE"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE user_id = $1
               AND (expires_at IS NULL OR expires_at > NOW())
               {unread_filter}
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Mark one notification as read. Scoped to the owning user so one user
    /// cannot mark another's rows. Returns `true` if a row was updated.
    pub async fn mark_read(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = NOW()
             WHERE id = $1 AND user_id = $2 AND is_read = FALSE",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert the same notification for every user in `user_ids`.
    /// Returns the number of rows created.
    pub async fn broadcast(
        pool: &PgPool,
        user_ids: &[DbId],
        input: &CreateNotification,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO notifications
                (user_id, notification_type, title, message, data, priority,
                 action_url, icon, expires_at)
             SELECT unnest($1::bigint[]), $2, $3, $4, $5, $6, $7, $8, $9",
        )
        .bind(user_ids)
        .bind(&input.notification_type)
        .bind(&input.title)
        .bind(&input.message)
        .bind(&input.data)
        .bind(input.priority.as_deref().unwrap_or(DEFAULT_PRIORITY))
        .bind(&input.action_url)
        .bind(&input.icon)
        .bind(input.expires_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
