//! Query parameter types shared across handlers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `?role=` on signup and login.
#[derive(Debug, Deserialize)]
pub struct RoleParam {
    pub role: Option<String>,
}

/// Public product listing parameters.
///
/// The serialized form (without paging) is echoed back as `filters`.
/// camelCase aliases are accepted for existing browser clients.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ProductListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    #[serde(alias = "minPrice")]
    pub min_price: Option<Decimal>,
    #[serde(alias = "maxPrice")]
    pub max_price: Option<Decimal>,
    #[serde(alias = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
    #[serde(skip_serializing)]
    pub page: Option<i64>,
    #[serde(skip_serializing)]
    pub limit: Option<i64>,
}

/// `GET /product/seller/my-products` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SellerProductsParams {
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
