//! Route definitions for the `/registrations` resource, including the
//! nested attendance and feedback listings.
//!
//! Static segments (`/stats`, `/pending/...`, `/session/...`) are declared
//! alongside `/{id}`; Axum's router prefers the static match.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{attendance, feedback, registration};
use crate::state::AppState;

/// Routes mounted at `/registrations`.
///
/// ```text
/// GET    /                            -> list_registrations
/// POST   /                            -> create_registration
/// GET    /stats                       -> registration_stats
/// GET    /pending/{coordinator_id}    -> list_pending_for_coordinator
/// GET    /session/{session_id}        -> list_for_session
/// GET    /{id}                        -> get_registration
/// PUT    /{id}                        -> update_registration (cancel)
/// DELETE /{id}                        -> delete_registration
/// POST   /{id}/approve                -> approve_registration
/// POST   /{id}/reject                 -> reject_registration
/// POST   /{id}/attendance             -> mark_attendance
/// GET    /{id}/attendance             -> list_attendance
/// GET    /{id}/feedback               -> list_feedback
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(registration::list_registrations).post(registration::create_registration),
        )
        .route("/stats", get(registration::registration_stats))
        .route(
            "/pending/{coordinator_id}",
            get(registration::list_pending_for_coordinator),
        )
        .route("/session/{session_id}", get(registration::list_for_session))
        .route(
            "/{id}",
            get(registration::get_registration)
                .put(registration::update_registration)
                .delete(registration::delete_registration),
        )
        .route("/{id}/approve", post(registration::approve_registration))
        .route("/{id}/reject", post(registration::reject_registration))
        .route(
            "/{id}/attendance",
            get(attendance::list_attendance).post(attendance::mark_attendance),
        )
        .route("/{id}/feedback", get(feedback::list_feedback))
}
