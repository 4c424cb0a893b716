use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// Largest accepted multipart body, image included.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Routes mounted at `/product`.
///
/// ```text
/// GET    /                    -> list_products
/// POST   /                    -> create_product (seller, multipart)
/// GET    /seller/my-products  -> my_products (seller)
/// GET    /{id}                -> get_product
/// PATCH  /{id}                -> update_product (owner or admin, multipart)
/// DELETE /{id}                -> delete_product (owner or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(product::list_products).post(product::create_product),
        )
        .route("/seller/my-products", get(product::my_products))
        .route(
            "/{id}",
            get(product::get_product)
                .patch(product::update_product)
                .delete(product::delete_product),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
