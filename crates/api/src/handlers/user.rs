//! Handlers for the `/users` resource. All endpoints are admin-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use skillforge_core::error::CoreError;
use skillforge_core::roles::{UserRole, UserStatus};
use skillforge_core::types::DbId;
use skillforge_db::models::user::{CreateUser, UpdateUser, UserResponse};
use skillforge_db::repositories::UserRepo;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /users`. Carries the plaintext password; the
/// handler hashes it before it reaches the repository.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub role: String,
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    let data = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    // Reject unknown roles before they hit the CHECK constraint.
    input
        .role
        .parse::<UserRole>()
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password_hash,
            phone: input.phone,
            role: input.role,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, "User created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: user.into() }),
    ))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse { data: user.into() }))
}

/// PUT /api/v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if let Some(role) = &input.role {
        role.parse::<UserRole>()
            .map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse { data: user.into() }))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = UserRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/users/{id}/ban
pub async fn ban_user(
    state: State<AppState>,
    admin: RequireAdmin,
    id: Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    set_user_status(state, admin, id, UserStatus::Banned).await
}

/// POST /api/v1/users/{id}/deactivate
pub async fn deactivate_user(
    state: State<AppState>,
    admin: RequireAdmin,
    id: Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    set_user_status(state, admin, id, UserStatus::Inactive).await
}

/// POST /api/v1/users/{id}/reactivate
pub async fn reactivate_user(
    state: State<AppState>,
    admin: RequireAdmin,
    id: Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    set_user_status(state, admin, id, UserStatus::Active).await
}

async fn set_user_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    status: UserStatus,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    // Admins cannot lock themselves out.
    if admin.user_id == id && status != UserStatus::Active {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot change the status of your own account".into(),
        )));
    }

    let user = UserRepo::set_status(&state.pool, id, status.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, status = %status, "User status changed");
    Ok(Json(DataResponse { data: user.into() }))
}
