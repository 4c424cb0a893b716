use axum::routing::get;
use axum::Router;

use crate::handlers::seller;
use crate::state::AppState;

/// Routes mounted at `/seller`.
///
/// ```text
/// GET    /          -> list_sellers (admin)
/// GET    /profile   -> profile (seller)
/// GET    /stats     -> stats (seller)
/// GET    /products  -> products (seller)
/// GET    /{id}      -> get_seller (self or admin)
/// PATCH  /{id}      -> update_seller (self or admin)
/// DELETE /{id}      -> delete_seller (self or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(seller::list_sellers))
        .route("/profile", get(seller::profile))
        .route("/stats", get(seller::stats))
        .route("/products", get(seller::products))
        .route(
            "/{id}",
            get(seller::get_seller)
                .patch(seller::update_seller)
                .delete(seller::delete_seller),
        )
}
