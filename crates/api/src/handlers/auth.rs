//! Handlers for the `/auth` resource (login, refresh, logout, password
//! reset).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use skillforge_core::error::CoreError;
use skillforge_core::roles::UserStatus;
use skillforge_core::types::DbId;
use skillforge_db::models::auth_session::CreateAuthSession;
use skillforge_db::models::password_reset::CreatePasswordResetToken;
use skillforge_db::repositories::{AuthSessionRepo, PasswordResetRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, generate_opaque_token, hash_opaque_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Lifetime of a password reset token in hours.
const RESET_TOKEN_EXPIRY_HOURS: i64 = 1;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `POST /auth/forgot-password`.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Request body for `POST /auth/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Find user by email.
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    // 2. Only active accounts may authenticate.
    let status: UserStatus = user
        .status
        .parse()
        .map_err(|e: String| AppError::InternalError(e))?;
    if !status.can_authenticate() {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Account is {status}"
        ))));
    }

    // 3. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    // 4. Generate tokens and create a session.
    let response = create_auth_response(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Hash the provided refresh token and find the matching session.
    let token_hash = hash_opaque_token(&input.refresh_token);
    let session = AuthSessionRepo::find_active_by_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // 2. Revoke the old session (token rotation).
    AuthSessionRepo::revoke(&state.pool, session.id).await?;

    // 3. The account must still be active.
    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let status: UserStatus = user
        .status
        .parse()
        .map_err(|e: String| AppError::InternalError(e))?;
    if !status.can_authenticate() {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Account is {status}"
        ))));
    }

    // 4. Generate new tokens and create a new session.
    let response = create_auth_response(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    AuthSessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/forgot-password
///
/// Issue a single-use reset token and email the reset link. Always answers
/// 200 with the same message so the endpoint cannot be used to probe which
/// email addresses exist.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    if let Some(user) = UserRepo::find_by_email(&state.pool, &input.email).await? {
        let (plaintext, token_hash) = generate_opaque_token();
        let expires_at = Utc::now() + chrono::Duration::hours(RESET_TOKEN_EXPIRY_HOURS);

        PasswordResetRepo::create(
            &state.pool,
            &CreatePasswordResetToken {
                user_id: user.id,
                token_hash,
                expires_at,
            },
        )
        .await?;

        let reset_link = format!("{}/reset-password?token={plaintext}", state.config.app_url);

        match &state.mailer {
            Some(mailer) => {
                if let Err(e) = mailer
                    .send_password_reset(&user.email, &user.display_name(), &reset_link)
                    .await
                {
                    // The token row exists either way; a mail outage should
                    // not reveal anything to the caller.
                    tracing::error!(error = %e, user_id = user.id, "Failed to send reset email");
                }
            }
            None => {
                tracing::info!(user_id = user.id, link = %reset_link, "SMTP not configured; reset link logged");
            }
        }
    }

    Ok(Json(MessageResponse {
        message: "If the email address is known, a reset link has been sent".to_string(),
    }))
}

/// POST /api/v1/auth/reset-password
///
/// Consume a reset token and set a new password. Revokes all of the user's
/// sessions so stolen refresh tokens die with the old password.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let token_hash = hash_opaque_token(&input.token);
    let token = PasswordResetRepo::find_valid_by_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Invalid or expired reset token".into(),
            ))
        })?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    UserRepo::update_password(&state.pool, token.user_id, &password_hash).await?;
    PasswordResetRepo::mark_used(&state.pool, token.id).await?;
    AuthSessionRepo::revoke_all_for_user(&state.pool, token.user_id).await?;

    tracing::info!(user_id = token.user_id, "Password reset completed");

    Ok(Json(MessageResponse {
        message: "Password has been reset".to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist a session row, and build the
/// response.
async fn create_auth_response(
    state: &AppState,
    user: &skillforge_db::models::user::User,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_opaque_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    AuthSessionRepo::create(
        &state.pool,
        &CreateAuthSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash,
            expires_at,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        },
    })
}
