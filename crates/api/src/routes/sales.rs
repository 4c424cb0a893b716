use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::sales;
use crate::state::AppState;

/// Routes mounted at `/sales`.
///
/// ```text
/// GET    /                    -> list_sales (admin)
/// POST   /                    -> create_sale (buyer)
/// GET    /brand/{brand_name}  -> brand_sales
/// GET    /my-purchases        -> my_purchases (buyer)
/// GET    /my-sales            -> my_sales (seller)
/// GET    /{id}                -> get_sale (party or admin)
/// DELETE /{id}                -> delete_sale (admin)
/// PATCH  /{id}/status         -> update_status (sale's seller or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sales::list_sales).post(sales::create_sale))
        .route("/brand/{brand_name}", get(sales::brand_sales))
        .route("/my-purchases", get(sales::my_purchases))
        .route("/my-sales", get(sales::my_sales))
        .route("/{id}", get(sales::get_sale).delete(sales::delete_sale))
        .route("/{id}/status", patch(sales::update_status))
}
