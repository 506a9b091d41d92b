//! Route definitions for the `/users` resource (admin only).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                 -> list_users
/// POST   /                 -> create_user
/// GET    /{id}             -> get_user
/// PUT    /{id}             -> update_user
/// DELETE /{id}             -> delete_user
/// POST   /{id}/ban         -> ban_user
/// POST   /{id}/deactivate  -> deactivate_user
/// POST   /{id}/reactivate  -> reactivate_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list_users).post(user::create_user))
        .route(
            "/{id}",
            get(user::get_user)
                .put(user::update_user)
                .delete(user::delete_user),
        )
        .route("/{id}/ban", post(user::ban_user))
        .route("/{id}/deactivate", post(user::deactivate_user))
        .route("/{id}/reactivate", post(user::reactivate_user))
}
