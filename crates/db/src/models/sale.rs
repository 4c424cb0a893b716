//! Sale model and DTOs.

use quickcart_core::sales::{SaleLine, SaleStatus};
use quickcart_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `sales` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sale {
    pub id: DbId,
    pub product_id: DbId,
    pub seller_id: DbId,
    pub buyer_id: DbId,
    pub quantity: i32,
    pub total_price: Decimal,
    #[sqlx(try_from = "String")]
    pub status: SaleStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A sale with display fields joined from its product, seller, and buyer.
///
/// The joined fields are `None` once the referenced row has been deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SaleDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub sale: Sale,
    pub product_title: Option<String>,
    pub product_image_url: Option<String>,
    pub seller_brand_name: Option<String>,
    pub buyer_username: Option<String>,
    pub buyer_email: Option<String>,
}

impl SaleDetail {
    pub fn line(&self) -> SaleLine<'_> {
        SaleLine {
            status: self.sale.status,
            quantity: self.sale.quantity,
            total_price: self.sale.total_price,
            product_title: self.product_title.as_deref(),
        }
    }
}

/// DTO for recording a purchase. Status always starts as pending.
#[derive(Debug, Clone)]
pub struct CreateSale {
    pub product_id: DbId,
    pub seller_id: DbId,
    pub buyer_id: DbId,
    pub quantity: i32,
    pub total_price: Decimal,
}
