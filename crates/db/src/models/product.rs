//! Catalog entry model, DTOs, and listing filter.

use quickcart_core::listing::{PageRequest, SortField, SortOrder};
use quickcart_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub seller_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public fields of the owning seller, joined onto product reads.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SellerSummary {
    #[sqlx(rename = "seller_id")]
    pub id: DbId,
    #[sqlx(rename = "seller_username")]
    pub username: String,
    #[sqlx(rename = "seller_brand_name")]
    pub brand_name: String,
    #[sqlx(rename = "seller_email")]
    pub email: String,
}

/// A product with its seller summary.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductWithSeller {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub product: Product,
    #[sqlx(flatten)]
    pub seller: SellerSummary,
}

/// Compact product shape used in seller listings and dashboards.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductSummary {
    pub id: DbId,
    pub title: String,
    pub price: Decimal,
    pub category: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub seller_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub image_url: Option<String>,
}

/// Partial product update. The owning seller never changes.
#[derive(Debug, Clone, Default)]
pub struct UpdateProduct {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

/// Normalized listing filter. `None` fields do not constrain the result.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring of title or description.
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub seller_id: Option<DbId>,
    pub sort: SortField,
    pub order: SortOrder,
    pub page: PageRequest,
}
