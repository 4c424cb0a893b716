use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST  /signup?role=     -> signup
/// POST  /login?role=      -> login
/// POST  /logout           -> logout
/// GET   /me               -> me (auth)
/// PATCH /change-password  -> change_password (auth)
/// PATCH /change-email     -> change_email (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/change-password", patch(auth::change_password))
        .route("/change-email", patch(auth::change_email))
}
