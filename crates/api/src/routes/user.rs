use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// GET    /         -> list_users (admin)
/// GET    /profile  -> profile (regular account)
/// GET    /{id}     -> get_user (self or admin)
/// PATCH  /{id}     -> update_user (self or admin)
/// DELETE /{id}     -> delete_user (self or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list_users))
        .route("/profile", get(user::profile))
        .route(
            "/{id}",
            get(user::get_user)
                .patch(user::update_user)
                .delete(user::delete_user),
        )
}
