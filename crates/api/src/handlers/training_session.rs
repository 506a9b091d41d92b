//! Handlers for the `/training-sessions` resource.
//!
//! Mutations require the coordinator capability; updates, deletes, and
//! archiving are further restricted to the session's owning coordinator (or
//! an admin).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use skillforge_core::error::CoreError;
use skillforge_core::schedule;
use skillforge_core::types::DbId;
use skillforge_db::models::training_session::{
    CreateTrainingSession, TrainingSession, TrainingSessionResponse, UpdateTrainingSession,
};
use skillforge_db::repositories::{CategoryRepo, RegistrationRepo, TrainingSessionRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireCoordinator};
use crate::query::IncludeArchivedParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Session detail payload: the session plus its registrations.
#[derive(Debug, Serialize)]
pub struct SessionDetail {
    #[serde(flatten)]
    pub session: TrainingSessionResponse,
    pub registration_count: usize,
}

/// GET /api/v1/training-sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Query(params): Query<IncludeArchivedParams>,
) -> AppResult<Json<DataResponse<Vec<TrainingSessionResponse>>>> {
    let sessions = TrainingSessionRepo::list(&state.pool, params.include_archived).await?;
    let data = sessions
        .into_iter()
        .map(TrainingSessionResponse::from)
        .collect();
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/training-sessions
pub async fn create_session(
    State(state): State<AppState>,
    RequireCoordinator(user): RequireCoordinator,
    Json(mut input): Json<CreateTrainingSession>,
) -> AppResult<(StatusCode, Json<DataResponse<TrainingSessionResponse>>)> {
    schedule::validate_time_range(input.start_time, input.end_time).map_err(AppError::Core)?;

    // Coordinators always create sessions they own; admins may create on
    // another coordinator's behalf.
    if !user.role.can_manage_users() {
        input.coordinator_id = user.user_id;
    }

    CategoryRepo::find_category(&state.pool, input.category_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: input.category_id,
        }))?;

    if let Some(trainer_id) = input.trainer_id {
        UserRepo::find_by_id(&state.pool, trainer_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "User",
                id: trainer_id,
            }))?;
    }

    let session = TrainingSessionRepo::create(&state.pool, &input).await?;
    tracing::info!(session_id = session.id, coordinator_id = session.coordinator_id, "Training session created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: session.into(),
        }),
    ))
}

/// GET /api/v1/training-sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SessionDetail>>> {
    let session = find_session(&state, id).await?;
    let registrations = RegistrationRepo::list_for_session(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: SessionDetail {
            session: session.into(),
            registration_count: registrations.len(),
        },
    }))
}

/// PUT /api/v1/training-sessions/{id}
pub async fn update_session(
    State(state): State<AppState>,
    RequireCoordinator(user): RequireCoordinator,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTrainingSession>,
) -> AppResult<Json<DataResponse<TrainingSessionResponse>>> {
    let existing = find_session(&state, id).await?;
    require_ownership(&user, &existing)?;

    // Validate the time range as it will be after the partial update.
    let start = input.start_time.unwrap_or(existing.start_time);
    let end = input.end_time.unwrap_or(existing.end_time);
    schedule::validate_time_range(start, end).map_err(AppError::Core)?;

    let session = TrainingSessionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TrainingSession",
            id,
        }))?;

    Ok(Json(DataResponse {
        data: session.into(),
    }))
}

/// DELETE /api/v1/training-sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    RequireCoordinator(user): RequireCoordinator,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_session(&state, id).await?;
    require_ownership(&user, &existing)?;

    TrainingSessionRepo::delete(&state.pool, id).await?;
    tracing::info!(session_id = id, "Training session deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/training-sessions/{id}/archive
///
/// Flip the persisted status to `archived`. Archived sessions disappear
/// from default listings but keep all child rows.
pub async fn archive_session(
    State(state): State<AppState>,
    RequireCoordinator(user): RequireCoordinator,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TrainingSessionResponse>>> {
    let existing = find_session(&state, id).await?;
    require_ownership(&user, &existing)?;

    let session = TrainingSessionRepo::archive(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TrainingSession",
            id,
        }))?;

    tracing::info!(session_id = id, "Training session archived");
    Ok(Json(DataResponse {
        data: session.into(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_session(state: &AppState, id: DbId) -> AppResult<TrainingSession> {
    TrainingSessionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TrainingSession",
            id,
        }))
}

/// Only the owning coordinator or an admin may mutate a session.
fn require_ownership(user: &AuthUser, session: &TrainingSession) -> AppResult<()> {
    if user.role.can_manage_users() || session.coordinator_id == user.user_id {
        return Ok(());
    }
    Err(AppError::Core(CoreError::Forbidden(
        "Only the session's coordinator may modify it".into(),
    )))
}
