//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not have the required capability. The capability predicates live on
//! [`skillforge_core::roles::UserRole`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use skillforge_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.can_manage_users() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `coordinator` or `admin` role. Rejects with 403 Forbidden
/// otherwise.
pub struct RequireCoordinator(pub AuthUser);

impl FromRequestParts<AppState> for RequireCoordinator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.can_coordinate_sessions() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Coordinator or Admin role required".into(),
            )));
        }
        Ok(RequireCoordinator(user))
    }
}

/// Requires `trainer`, `coordinator`, or `admin` role (attendance marking).
pub struct RequireAttendanceMarker(pub AuthUser);

impl FromRequestParts<AppState> for RequireAttendanceMarker {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.can_mark_attendance() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Trainer, Coordinator, or Admin role required".into(),
            )));
        }
        Ok(RequireAttendanceMarker(user))
    }
}

/// Requires any authenticated user (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for use in
/// route definitions where the intent "this route requires authentication"
/// should be self-documenting.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
