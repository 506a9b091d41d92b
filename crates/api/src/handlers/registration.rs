//! Handlers for the `/registrations` resource.
//!
//! Registrations start `pending`; the coordinator who owns the session (or
//! an admin) decides them via approve/reject. A trainee may cancel their own
//! registration as long as the session has not started.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use skillforge_core::error::CoreError;
use skillforge_core::registration::RegistrationStatus;
use skillforge_core::types::DbId;
use skillforge_db::models::notification::CreateNotification;
use skillforge_db::models::registration::{CreateRegistration, Registration, RegistrationStats};
use skillforge_db::models::training_session::TrainingSession;
use skillforge_db::repositories::{
    NotificationRepo, RegistrationRepo, TrainingSessionRepo, UserRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireCoordinator};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /registrations/{id}`. The only self-service status
/// change is cancellation; approval and rejection have their own endpoints.
#[derive(Debug, Deserialize)]
pub struct UpdateRegistrationRequest {
    pub status: String,
}

/// GET /api/v1/registrations
pub async fn list_registrations(
    State(state): State<AppState>,
    _coordinator: RequireCoordinator,
) -> AppResult<Json<DataResponse<Vec<Registration>>>> {
    let registrations = RegistrationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: registrations,
    }))
}

/// POST /api/v1/registrations
///
/// Trainees register themselves; coordinators and admins may register any
/// user. The row always starts `pending`.
pub async fn create_registration(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(mut input): Json<CreateRegistration>,
) -> AppResult<(StatusCode, Json<DataResponse<Registration>>)> {
    if !user.role.can_coordinate_sessions() {
        input.user_id = user.user_id;
    } else {
        // Coordinators and admins may name any user, so the id has to be
        // checked before the INSERT hits the foreign key.
        UserRepo::find_by_id(&state.pool, input.user_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "User",
                id: input.user_id,
            }))?;
    }

    let session = find_session(&state, input.training_session_id).await?;
    if session.status != "active" {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot register for an archived session".into(),
        )));
    }

    // Duplicate (user, session) pairs bounce off the unique constraint and
    // surface as 409.
    let registration = RegistrationRepo::create(&state.pool, &input).await?;
    tracing::info!(
        registration_id = registration.id,
        user_id = registration.user_id,
        session_id = registration.training_session_id,
        "Registration created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: registration }),
    ))
}

/// GET /api/v1/registrations/{id}
pub async fn get_registration(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Registration>>> {
    let registration = find_registration(&state, id).await?;

    // Trainees may only see their own rows.
    if !user.role.can_coordinate_sessions() && registration.user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not your registration".into(),
        )));
    }

    Ok(Json(DataResponse { data: registration }))
}

/// PUT /api/v1/registrations/{id}
///
/// Self-service cancellation by the registered trainee. Allowed only while
/// the registration is still pending or confirmed AND the session has not
/// started; any other target status is rejected.
pub async fn update_registration(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRegistrationRequest>,
) -> AppResult<Json<DataResponse<Registration>>> {
    let target: RegistrationStatus = input
        .status
        .parse()
        .map_err(|e: String| AppError::Core(CoreError::Validation(e)))?;

    if target != RegistrationStatus::Cancelled {
        return Err(AppError::Core(CoreError::Validation(
            "Only cancellation is allowed here; use approve/reject endpoints".into(),
        )));
    }

    let registration = find_registration(&state, id).await?;
    if registration.user_id != user.user_id && !user.role.can_manage_users() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not your registration".into(),
        )));
    }

    let current: RegistrationStatus = registration
        .status
        .parse()
        .map_err(|e: String| AppError::InternalError(e))?;
    let session = find_session(&state, registration.training_session_id).await?;

    if !current.can_be_cancelled(session.phase()) {
        return Err(AppError::Core(CoreError::Validation(
            "Registration can no longer be cancelled".into(),
        )));
    }

    let updated = set_status(&state, id, RegistrationStatus::Cancelled).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/registrations/{id}
pub async fn delete_registration(
    State(state): State<AppState>,
    _coordinator: RequireCoordinator,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = RegistrationRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/registrations/{id}/approve
pub async fn approve_registration(
    state: State<AppState>,
    coordinator: RequireCoordinator,
    id: Path<DbId>,
) -> AppResult<Json<DataResponse<Registration>>> {
    decide_registration(state, coordinator, id, Decision::Approve).await
}

/// POST /api/v1/registrations/{id}/reject
pub async fn reject_registration(
    state: State<AppState>,
    coordinator: RequireCoordinator,
    id: Path<DbId>,
) -> AppResult<Json<DataResponse<Registration>>> {
    decide_registration(state, coordinator, id, Decision::Reject).await
}

/// GET /api/v1/registrations/pending/{coordinator_id}
///
/// Pending registrations across all sessions owned by a coordinator.
/// Coordinators may only query their own queue; admins may query anyone's.
pub async fn list_pending_for_coordinator(
    State(state): State<AppState>,
    RequireCoordinator(user): RequireCoordinator,
    Path(coordinator_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Registration>>>> {
    if !user.role.can_manage_users() && user.user_id != coordinator_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not your pending queue".into(),
        )));
    }

    let registrations =
        RegistrationRepo::list_pending_for_coordinator(&state.pool, coordinator_id).await?;
    Ok(Json(DataResponse {
        data: registrations,
    }))
}

/// GET /api/v1/registrations/session/{session_id}
pub async fn list_for_session(
    State(state): State<AppState>,
    _coordinator: RequireCoordinator,
    Path(session_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Registration>>>> {
    find_session(&state, session_id).await?;
    let registrations = RegistrationRepo::list_for_session(&state.pool, session_id).await?;
    Ok(Json(DataResponse {
        data: registrations,
    }))
}

/// GET /api/v1/registrations/stats
pub async fn registration_stats(
    State(state): State<AppState>,
    _coordinator: RequireCoordinator,
) -> AppResult<Json<DataResponse<RegistrationStats>>> {
    let stats = RegistrationRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

enum Decision {
    Approve,
    Reject,
}

/// Shared approve/reject flow: ownership check, state-machine transition,
/// persist, notify the trainee.
async fn decide_registration(
    State(state): State<AppState>,
    RequireCoordinator(user): RequireCoordinator,
    Path(id): Path<DbId>,
    decision: Decision,
) -> AppResult<Json<DataResponse<Registration>>> {
    let registration = find_registration(&state, id).await?;
    let session = find_session(&state, registration.training_session_id).await?;

    // Only the coordinator who owns the session (or an admin) may decide.
    if !user.role.can_manage_users() && session.coordinator_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the session's coordinator may decide this registration".into(),
        )));
    }

    let current: RegistrationStatus = registration
        .status
        .parse()
        .map_err(|e: String| AppError::InternalError(e))?;

    let (new_status, verb) = match decision {
        Decision::Approve => (current.approve().map_err(AppError::Core)?, "approved"),
        Decision::Reject => (current.reject().map_err(AppError::Core)?, "rejected"),
    };

    let updated = set_status(&state, id, new_status).await?;

    // Best-effort in-app notification for the trainee; the decision is
    // already persisted, so a notification failure only gets logged.
    let notification = CreateNotification {
        user_id: registration.user_id,
        notification_type: format!("registration_{verb}"),
        title: format!("Registration {verb}"),
        message: format!(
            "Your registration for '{}' on {} was {verb}",
            session.skill_name, session.session_date
        ),
        data: None,
        priority: None,
        action_url: Some(format!("/training-sessions/{}", session.id)),
        icon: None,
        expires_at: None,
    };
    if let Err(e) = NotificationRepo::create(&state.pool, &notification).await {
        tracing::error!(error = %e, registration_id = id, "Failed to create decision notification");
    }

    tracing::info!(
        registration_id = id,
        decided_by = user.user_id,
        status = %new_status,
        "Registration decided"
    );

    Ok(Json(DataResponse { data: updated }))
}

async fn set_status(
    state: &AppState,
    id: DbId,
    status: RegistrationStatus,
) -> AppResult<Registration> {
    RegistrationRepo::set_status(&state.pool, id, status.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id,
        }))
}

async fn find_registration(state: &AppState, id: DbId) -> AppResult<Registration> {
    RegistrationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id,
        }))
}

async fn find_session(state: &AppState, id: DbId) -> AppResult<TrainingSession> {
    TrainingSessionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TrainingSession",
            id,
        }))
}
