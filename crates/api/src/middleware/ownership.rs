//! Resource-level authorization: load the target, then check the actor.
//!
//! Absence is reported before ownership, so a missing resource is 404 for
//! every caller.

use quickcart_core::access::{check_product_owner, check_sale_party, check_sale_seller, Actor};
use quickcart_core::error::CoreError;
use quickcart_core::types::DbId;
use quickcart_db::models::product::Product;
use quickcart_db::models::sale::{Sale, SaleDetail};
use quickcart_db::repositories::{ProductRepo, SaleRepo};
use quickcart_db::DbPool;

use crate::error::AppResult;

/// Load a product the actor may modify.
pub async fn load_owned_product(
    pool: &DbPool,
    actor: &Actor,
    product_id: DbId,
) -> AppResult<Product> {
    let product = ProductRepo::find_by_id(pool, product_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        })?;
    check_product_owner(actor, product.seller_id)?;
    Ok(product)
}

/// Load a sale the actor may view.
///
/// Admins pass without the party check; everyone else must be the buyer or
/// the seller.
pub async fn load_visible_sale(
    pool: &DbPool,
    actor: &Actor,
    sale_id: DbId,
) -> AppResult<SaleDetail> {
    let detail = SaleRepo::find_detail(pool, sale_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Sale",
            id: sale_id,
        })?;
    if !actor.is_admin() {
        check_sale_party(actor, detail.sale.buyer_id, detail.sale.seller_id)?;
    }
    Ok(detail)
}

/// Load a sale whose status the actor may change.
pub async fn load_sale_for_status_change(
    pool: &DbPool,
    actor: &Actor,
    sale_id: DbId,
) -> AppResult<Sale> {
    let sale = SaleRepo::find_by_id(pool, sale_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Sale",
            id: sale_id,
        })?;
    check_sale_seller(actor, sale.seller_id)?;
    Ok(sale)
}
