//! Seller account model and DTOs.

use chrono::NaiveDate;
use quickcart_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::product::ProductSummary;

/// Full row from the `sellers` table. Contains the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct Seller {
    pub id: DbId,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub brand_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Seller representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct SellerResponse {
    pub id: DbId,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub brand_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Seller> for SellerResponse {
    fn from(seller: Seller) -> Self {
        Self {
            id: seller.id,
            username: seller.username,
            first_name: seller.first_name,
            last_name: seller.last_name,
            email: seller.email,
            brand_name: seller.brand_name,
            address: seller.address,
            phone: seller.phone,
            birth_date: seller.birth_date,
            created_at: seller.created_at,
            updated_at: seller.updated_at,
        }
    }
}

/// A seller together with a summary of their catalog.
#[derive(Debug, Clone, Serialize)]
pub struct SellerWithProducts {
    #[serde(flatten)]
    pub seller: SellerResponse,
    pub products: Vec<ProductSummary>,
}

#[derive(Debug, Clone)]
pub struct CreateSeller {
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub brand_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// Profile edit. Email, password, and id are not editable here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSeller {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub brand_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// Number of products a seller lists in one category.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}
