//! Route definitions for the `/notifications` resource.
//!
//! All endpoints require authentication; create and broadcast are admin
//! operations (enforced by the handlers' extractors).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /                 -> list_notifications
/// POST   /                 -> create_notification (admin)
/// GET    /unread           -> list_unread
/// POST   /broadcast        -> broadcast (admin)
/// POST   /{id}/mark-read   -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(notification::list_notifications).post(notification::create_notification),
        )
        .route("/unread", get(notification::list_unread))
        .route("/broadcast", post(notification::broadcast))
        .route("/{id}/mark-read", post(notification::mark_read))
}
