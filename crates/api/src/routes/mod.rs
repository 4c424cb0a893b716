pub mod auth;
pub mod health;
pub mod product;
pub mod sales;
pub mod seller;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /auth/signup, /auth/login, /auth/logout          session lifecycle
/// /auth/me, /auth/change-password, /auth/change-email
///
/// /product                                         list (public), create (seller)
/// /product/{id}                                    get (public), update, delete (owner or admin)
/// /product/seller/my-products                      caller's catalog (seller)
///
/// /seller/profile, /seller/stats, /seller/products seller dashboard
/// /seller                                          list (admin)
/// /seller/{id}                                     get, update, delete (self or admin)
///
/// /user/profile                                    own profile (regular account)
/// /user                                            list (admin)
/// /user/{id}                                       get, update, delete (self or admin)
///
/// /sales/brand/{brand_name}                        brand feed (public)
/// /sales                                           list (admin), create (buyer)
/// /sales/my-purchases, /sales/my-sales             party views
/// /sales/{id}                                      get (party or admin), delete (admin)
/// /sales/{id}/status                               status change (sale's seller or admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/product", product::router())
        .nest("/seller", seller::router())
        .nest("/user", user::router())
        .nest("/sales", sales::router())
}
