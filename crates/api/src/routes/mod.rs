pub mod auth;
pub mod health;
pub mod notification;
pub mod registration;
pub mod session_completion;
pub mod training_session;
pub mod user;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                  login (public)
/// /auth/refresh                                refresh (public)
/// /auth/logout                                 logout (requires auth)
/// /auth/forgot-password                        request reset (public)
/// /auth/reset-password                         consume reset token (public)
///
/// /users                                       list, create (admin)
/// /users/{id}                                  get, update, delete (admin)
/// /users/{id}/ban | /deactivate | /reactivate  status changes (admin)
///
/// /training-sessions                           list, create
/// /training-sessions/{id}                      get, update, delete
/// /training-sessions/{id}/archive              archive (POST)
///
/// /registrations                               list, create
/// /registrations/stats                         status counts
/// /registrations/pending/{coordinator_id}      coordinator's pending queue
/// /registrations/session/{session_id}          per-session listing
/// /registrations/{id}                          get, cancel, delete
/// /registrations/{id}/approve | /reject        coordinator decisions
/// /registrations/{id}/attendance               mark, list
/// /registrations/{id}/feedback                 list
///
/// /session-completions                         list, create
/// /session-completions/{id}                    get, update, delete
/// /session-completions/{id}/mark-completed     finish + certificate
/// /session-completions/{id}/certificate        certificate backfill
///
/// /notifications                               list, create (admin)
/// /notifications/unread                        unread listing
/// /notifications/broadcast                     broadcast (admin)
/// /notifications/{id}/mark-read                mark one read
///
/// /feedback                                    submit feedback
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", user::router())
        .nest("/training-sessions", training_session::router())
        .nest("/registrations", registration::router())
        .nest("/session-completions", session_completion::router())
        .nest("/notifications", notification::router())
        .route("/feedback", post(handlers::feedback::create_feedback))
}
