//! Handlers for the `/notifications` resource.
//!
//! Notifications are persisted in-app rows; listing is always scoped to the
//! authenticated user. Creating and broadcasting are admin operations.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use skillforge_core::error::CoreError;
use skillforge_core::types::DbId;
use skillforge_db::models::notification::{CreateNotification, Notification};
use skillforge_db::repositories::{NotificationRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload for `POST /notifications/broadcast`.
#[derive(Debug, Serialize)]
pub struct BroadcastResult {
    pub recipients: u64,
}

/// GET /api/v1/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        user.user_id,
        false,
        params.limit(),
        params.offset(),
    )
    .await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// GET /api/v1/notifications/unread
pub async fn list_unread(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        user.user_id,
        true,
        params.limit(),
        params.offset(),
    )
    .await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// POST /api/v1/notifications
pub async fn create_notification(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(input): Json<CreateNotification>,
) -> AppResult<(StatusCode, Json<DataResponse<Notification>>)> {
    UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.user_id,
        }))?;

    let notification = NotificationRepo::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: notification }),
    ))
}

/// POST /api/v1/notifications/{id}/mark-read
///
/// Scoped to the authenticated user; marking another user's notification
/// reads as 404.
pub async fn mark_read(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let marked = NotificationRepo::mark_read(&state.pool, id, user.user_id).await?;
    if !marked {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/notifications/broadcast
///
/// Insert the same notification for every active user. The `user_id` in the
/// body is ignored.
pub async fn broadcast(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateNotification>,
) -> AppResult<(StatusCode, Json<DataResponse<BroadcastResult>>)> {
    let user_ids = UserRepo::list_active_ids(&state.pool).await?;
    let recipients = NotificationRepo::broadcast(&state.pool, &user_ids, &input).await?;

    tracing::info!(
        sent_by = admin.user_id,
        recipients,
        title = %input.title,
        "Notification broadcast"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: BroadcastResult { recipients },
        }),
    ))
}
