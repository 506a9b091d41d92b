//! Route definitions for the `/training-sessions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::training_session;
use crate::state::AppState;

/// Routes mounted at `/training-sessions`.
///
/// ```text
/// GET    /              -> list_sessions
/// POST   /              -> create_session
/// GET    /{id}          -> get_session
/// PUT    /{id}          -> update_session
/// DELETE /{id}          -> delete_session
/// POST   /{id}/archive  -> archive_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(training_session::list_sessions).post(training_session::create_session),
        )
        .route(
            "/{id}",
            get(training_session::get_session)
                .put(training_session::update_session)
                .delete(training_session::delete_session),
        )
        .route("/{id}/archive", post(training_session::archive_session))
}
