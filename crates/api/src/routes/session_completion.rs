//! Route definitions for the `/session-completions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::session_completion;
use crate::state::AppState;

/// Routes mounted at `/session-completions`.
///
/// ```text
/// GET    /                      -> list_completions
/// POST   /                      -> create_completion
/// GET    /{id}                  -> get_completion
/// PUT    /{id}                  -> update_completion
/// DELETE /{id}                  -> delete_completion
/// POST   /{id}/mark-completed   -> mark_completed
/// POST   /{id}/certificate      -> issue_certificate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(session_completion::list_completions).post(session_completion::create_completion),
        )
        .route(
            "/{id}",
            get(session_completion::get_completion)
                .put(session_completion::update_completion)
                .delete(session_completion::delete_completion),
        )
        .route(
            "/{id}/mark-completed",
            post(session_completion::mark_completed),
        )
        .route(
            "/{id}/certificate",
            post(session_completion::issue_certificate),
        )
}
