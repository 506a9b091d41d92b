//! Handlers for trainee feedback on sessions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use skillforge_core::error::CoreError;
use skillforge_core::types::DbId;
use skillforge_db::models::feedback::{CreateFeedback, Feedback};
use skillforge_db::repositories::{FeedbackRepo, RegistrationRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/feedback
///
/// Submit feedback for a registration. The request names both the
/// registration and the session; the pair is cross-checked so feedback can
/// never be attached under the wrong session.
pub async fn create_feedback(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<CreateFeedback>,
) -> AppResult<(StatusCode, Json<DataResponse<Feedback>>)> {
    if !(1..=5).contains(&input.rating) {
        return Err(AppError::Core(CoreError::Validation(
            "Rating must be between 1 and 5".into(),
        )));
    }

    let registration = RegistrationRepo::find_by_id(&state.pool, input.registration_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id: input.registration_id,
        }))?;

    if registration.training_session_id != input.training_session_id {
        return Err(AppError::Core(CoreError::Validation(
            "Registration does not belong to the specified training session".into(),
        )));
    }

    // Trainees may only review their own registrations.
    if !user.role.can_coordinate_sessions() && registration.user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not your registration".into(),
        )));
    }

    let feedback = FeedbackRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: feedback })))
}

/// GET /api/v1/registrations/{id}/feedback
pub async fn list_feedback(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(registration_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Feedback>>>> {
    RegistrationRepo::find_by_id(&state.pool, registration_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id: registration_id,
        }))?;

    let feedback = FeedbackRepo::list_for_registration(&state.pool, registration_id).await?;
    Ok(Json(DataResponse { data: feedback }))
}
