//! Handlers for per-course attendance under a registration.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use skillforge_core::error::CoreError;
use skillforge_core::types::DbId;
use skillforge_db::models::attendance::{Attendance, CreateAttendance};
use skillforge_db::repositories::{AttendanceRepo, CategoryRepo, RegistrationRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAttendanceMarker, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/registrations/{id}/attendance
///
/// Mark attendance for one course under a registration. Re-marking the same
/// course overwrites the previous value.
pub async fn mark_attendance(
    State(state): State<AppState>,
    _marker: RequireAttendanceMarker,
    Path(registration_id): Path<DbId>,
    Json(input): Json<CreateAttendance>,
) -> AppResult<(StatusCode, Json<DataResponse<Attendance>>)> {
    RegistrationRepo::find_by_id(&state.pool, registration_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id: registration_id,
        }))?;

    CategoryRepo::find_course(&state.pool, input.training_course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TrainingCourse",
            id: input.training_course_id,
        }))?;

    let attendance = AttendanceRepo::mark(&state.pool, registration_id, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: attendance }),
    ))
}

/// GET /api/v1/registrations/{id}/attendance
pub async fn list_attendance(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(registration_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Attendance>>>> {
    RegistrationRepo::find_by_id(&state.pool, registration_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id: registration_id,
        }))?;

    let marks = AttendanceRepo::list_for_registration(&state.pool, registration_id).await?;
    Ok(Json(DataResponse { data: marks }))
}
