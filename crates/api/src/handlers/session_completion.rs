//! Handlers for the `/session-completions` resource, including the
//! completion-to-certificate pipeline.
//!
//! Marking a completion finished and recording its certificate happens in a
//! single UPDATE guarded by `completed_at IS NULL`, so the flag and the URL
//! can never diverge and a repeated call is reported instead of silently
//! re-running the pipeline. The certificate is rendered and uploaded BEFORE
//! that write; if any pipeline stage fails, the row stays untouched.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use skillforge_core::error::CoreError;
use skillforge_core::registration::RegistrationStatus;
use skillforge_core::types::DbId;
use skillforge_db::models::session_completion::{
    CreateSessionCompletion, SessionCompletion, UpdateSessionCompletion,
};
use skillforge_db::repositories::{
    CategoryRepo, RegistrationRepo, SessionCompletionRepo, TrainingSessionRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireCoordinator;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/session-completions
pub async fn list_completions(
    State(state): State<AppState>,
    _coordinator: RequireCoordinator,
) -> AppResult<Json<DataResponse<Vec<SessionCompletion>>>> {
    let completions = SessionCompletionRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: completions }))
}

/// POST /api/v1/session-completions
///
/// Start tracking completion for a confirmed registration. When
/// `total_courses` is not positive, it is seeded from the session category's
/// course count.
pub async fn create_completion(
    State(state): State<AppState>,
    RequireCoordinator(user): RequireCoordinator,
    Json(mut input): Json<CreateSessionCompletion>,
) -> AppResult<(StatusCode, Json<DataResponse<SessionCompletion>>)> {
    let registration = RegistrationRepo::find_by_id(&state.pool, input.registration_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id: input.registration_id,
        }))?;

    let status: RegistrationStatus = registration
        .status
        .parse()
        .map_err(|e: String| AppError::InternalError(e))?;
    if status != RegistrationStatus::Confirmed {
        return Err(AppError::Core(CoreError::Validation(
            "Completion tracking requires a confirmed registration".into(),
        )));
    }

    let session = find_owned_session(&state, &user, registration.training_session_id).await?;

    if input.total_courses <= 0 {
        let count =
            CategoryRepo::count_courses_in_category(&state.pool, session.category_id).await?;
        input.total_courses = i32::try_from(count).unwrap_or(i32::MAX);
    }

    // A second completion for the same registration bounces off the unique
    // constraint and surfaces as 409.
    let completion = SessionCompletionRepo::create(&state.pool, session.id, &input).await?;
    tracing::info!(
        completion_id = completion.id,
        registration_id = completion.registration_id,
        "Session completion tracking started"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: completion }),
    ))
}

/// GET /api/v1/session-completions/{id}
pub async fn get_completion(
    State(state): State<AppState>,
    _coordinator: RequireCoordinator,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SessionCompletion>>> {
    let completion = find_completion(&state, id).await?;
    Ok(Json(DataResponse { data: completion }))
}

/// PUT /api/v1/session-completions/{id}
///
/// Progress update (courses completed, notes). Finished completions are
/// frozen.
pub async fn update_completion(
    State(state): State<AppState>,
    RequireCoordinator(user): RequireCoordinator,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSessionCompletion>,
) -> AppResult<Json<DataResponse<SessionCompletion>>> {
    let existing = find_completion(&state, id).await?;
    find_owned_session(&state, &user, existing.training_session_id).await?;

    if existing.is_completed() {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot update a completion that is already marked as completed".into(),
        )));
    }

    let completion = SessionCompletionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SessionCompletion",
            id,
        }))?;

    Ok(Json(DataResponse { data: completion }))
}

/// DELETE /api/v1/session-completions/{id}
pub async fn delete_completion(
    State(state): State<AppState>,
    RequireCoordinator(user): RequireCoordinator,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_completion(&state, id).await?;
    find_owned_session(&state, &user, existing.training_session_id).await?;

    SessionCompletionRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/session-completions/{id}/mark-completed
///
/// Finish a completion: run the certificate pipeline, then set
/// `completed_at`, the certificate URL, and the issued flag in one write.
pub async fn mark_completed(
    State(state): State<AppState>,
    RequireCoordinator(user): RequireCoordinator,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SessionCompletion>>> {
    let completion = find_completion(&state, id).await?;
    find_owned_session(&state, &user, completion.training_session_id).await?;

    if completion.is_completed() {
        return Err(AppError::Core(CoreError::Validation(
            "Session completion is already marked as completed".into(),
        )));
    }

    // Render and upload first. A pipeline failure leaves the row untouched,
    // so the whole operation is all-or-nothing from the client's view.
    let certificate_url = state.certificates.generate(&state.pool, &completion).await?;

    let updated = SessionCompletionRepo::mark_completed_with_certificate(
        &state.pool,
        id,
        &certificate_url,
    )
    .await?
    .ok_or_else(|| {
        // Lost a race with a concurrent mark-completed call.
        AppError::Core(CoreError::Validation(
            "Session completion is already marked as completed".into(),
        ))
    })?;

    tracing::info!(
        completion_id = id,
        certificate_url = %certificate_url,
        "Session completion marked completed, certificate issued"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/session-completions/{id}/certificate
///
/// Issue a certificate for an already-finished completion that does not
/// have one yet (backfill path).
pub async fn issue_certificate(
    State(state): State<AppState>,
    RequireCoordinator(user): RequireCoordinator,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SessionCompletion>>> {
    let completion = find_completion(&state, id).await?;
    find_owned_session(&state, &user, completion.training_session_id).await?;

    if !completion.is_completed() {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot issue a certificate before the completion is marked as completed".into(),
        )));
    }
    if !completion.certificate_due() {
        return Err(AppError::Core(CoreError::Validation(
            "Certificate has already been issued".into(),
        )));
    }

    let certificate_url = state.certificates.generate(&state.pool, &completion).await?;

    let updated = SessionCompletionRepo::issue_certificate(&state.pool, id, &certificate_url)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Certificate has already been issued".into(),
            ))
        })?;

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_completion(state: &AppState, id: DbId) -> AppResult<SessionCompletion> {
    SessionCompletionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SessionCompletion",
            id,
        }))
}

/// Load the session and enforce that `user` owns it (or is an admin).
async fn find_owned_session(
    state: &AppState,
    user: &AuthUser,
    session_id: DbId,
) -> AppResult<skillforge_db::models::training_session::TrainingSession> {
    let session = TrainingSessionRepo::find_by_id(&state.pool, session_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TrainingSession",
            id: session_id,
        }))?;

    if !user.role.can_manage_users() && session.coordinator_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the session's coordinator may manage its completions".into(),
        )));
    }
    Ok(session)
}
