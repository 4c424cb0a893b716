//! Handlers for the `/sales` resource.
//!
//! A sale copies its seller and price from the product at purchase time and
//! keeps them after the product is gone.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use quickcart_core::error::CoreError;
use quickcart_core::sales::{
    compute_total, summarize, units_by_product, validate_quantity, SaleStatus, SalesSummary,
};
use quickcart_core::types::DbId;
use quickcart_db::models::sale::{CreateSale, SaleDetail};
use quickcart_db::repositories::{ProductRepo, SaleRepo, SellerRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::ownership::{load_sale_for_status_change, load_visible_sale};
use crate::middleware::rbac::{RequireAdmin, RequireBuyer, RequireSeller, RequireSellerOrAdmin};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Number of sales shown in a brand's recent list.
const RECENT_SALES: usize = 10;

#[derive(Debug, Deserialize)]
pub struct CreateSaleRequest {
    pub product_id: Option<DbId>,
    pub quantity: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BrandStats {
    pub brand_name: String,
    #[serde(flatten)]
    pub summary: SalesSummary,
    pub recent_sales: Vec<SaleDetail>,
}

#[derive(Debug, Serialize)]
pub struct BrandSales {
    pub sales: Vec<SaleDetail>,
    pub stats: BrandStats,
}

#[derive(Debug, Serialize)]
pub struct SellerSalesStats {
    #[serde(flatten)]
    pub summary: SalesSummary,
    /// Units sold per product title.
    pub top_products: BTreeMap<String, i64>,
}

#[derive(Debug, Serialize)]
pub struct SellerSales {
    pub sales: Vec<SaleDetail>,
    pub stats: SellerSalesStats,
}

#[derive(Debug, Serialize)]
pub struct DeletedSale {
    pub deleted_sale_id: DbId,
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: "Sale", id }
}

async fn load_detail(state: &AppState, id: DbId) -> AppResult<SaleDetail> {
    let detail = SaleRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(detail)
}

/// GET /api/sales/brand/{brand_name}
///
/// Public sales feed and figures for one brand.
pub async fn brand_sales(
    State(state): State<AppState>,
    Path(brand_name): Path<String>,
) -> AppResult<Json<ApiResponse<BrandSales>>> {
    let seller = SellerRepo::find_by_brand_name(&state.pool, &brand_name)
        .await?
        .ok_or_else(|| AppError::NotFound("Brand not found".into()))?;

    let sales = SaleRepo::list_by_seller(&state.pool, seller.id).await?;
    let summary = summarize(sales.iter().map(SaleDetail::line));
    let recent_sales = sales.iter().take(RECENT_SALES).cloned().collect();

    Ok(Json(ApiResponse::data(BrandSales {
        sales,
        stats: BrandStats {
            brand_name: seller.brand_name,
            summary,
            recent_sales,
        },
    })))
}

/// POST /api/sales
pub async fn create_sale(
    State(state): State<AppState>,
    RequireBuyer(user): RequireBuyer,
    Json(input): Json<CreateSaleRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<SaleDetail>>)> {
    let (Some(product_id), Some(quantity)) = (input.product_id, input.quantity) else {
        return Err(CoreError::Validation("Product ID and quantity are required".into()).into());
    };
    validate_quantity(quantity)?;

    let product = ProductRepo::find_by_id(&state.pool, product_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        })?;

    let input = CreateSale {
        product_id: product.id,
        seller_id: product.seller_id,
        buyer_id: user.account_id,
        quantity,
        total_price: compute_total(product.price, quantity)?,
    };
    let sale = SaleRepo::create(&state.pool, &input).await?;

    tracing::info!(
        sale_id = sale.id,
        product_id = sale.product_id,
        buyer_id = sale.buyer_id,
        seller_id = sale.seller_id,
        total_price = %sale.total_price,
        "Sale created"
    );

    let detail = load_detail(&state, sale.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Sale created successfully", detail)),
    ))
}

/// GET /api/sales/my-purchases
pub async fn my_purchases(
    State(state): State<AppState>,
    RequireBuyer(user): RequireBuyer,
) -> AppResult<Json<ApiResponse<Vec<SaleDetail>>>> {
    let sales = SaleRepo::list_by_buyer(&state.pool, user.account_id).await?;
    Ok(Json(ApiResponse::data(sales)))
}

/// GET /api/sales/my-sales
pub async fn my_sales(
    State(state): State<AppState>,
    RequireSeller(user): RequireSeller,
) -> AppResult<Json<ApiResponse<SellerSales>>> {
    let sales = SaleRepo::list_by_seller(&state.pool, user.account_id).await?;
    let stats = SellerSalesStats {
        summary: summarize(sales.iter().map(SaleDetail::line)),
        top_products: units_by_product(sales.iter().map(SaleDetail::line)),
    };
    Ok(Json(ApiResponse::data(SellerSales { sales, stats })))
}

/// PATCH /api/sales/{id}/status
///
/// Only the sale's seller or an admin may move a sale between statuses.
pub async fn update_status(
    State(state): State<AppState>,
    RequireSellerOrAdmin(user): RequireSellerOrAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<SaleDetail>>> {
    let status: SaleStatus = input.status.unwrap_or_default().parse()?;

    let sale = load_sale_for_status_change(&state.pool, &user.actor(), id).await?;
    SaleRepo::update_status(&state.pool, sale.id, status)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        sale_id = id,
        from = %sale.status,
        to = %status,
        account_id = user.account_id,
        role = %user.role,
        "Sale status changed"
    );

    let detail = load_detail(&state, id).await?;
    Ok(Json(ApiResponse::with_message(
        "Sale status updated successfully",
        detail,
    )))
}

/// GET /api/sales/{id}
pub async fn get_sale(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<SaleDetail>>> {
    let detail = load_visible_sale(&state.pool, &user.actor(), id).await?;
    Ok(Json(ApiResponse::data(detail)))
}

/// GET /api/sales
pub async fn list_sales(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<Vec<SaleDetail>>>> {
    let sales = SaleRepo::list_all(&state.pool).await?;
    Ok(Json(ApiResponse::data(sales)))
}

/// DELETE /api/sales/{id}
pub async fn delete_sale(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<DeletedSale>>> {
    if !SaleRepo::delete(&state.pool, id).await? {
        return Err(not_found(id).into());
    }

    tracing::info!(sale_id = id, admin_id = admin.account_id, "Sale deleted");

    Ok(Json(ApiResponse::with_message(
        "Sale deleted successfully",
        DeletedSale {
            deleted_sale_id: id,
        },
    )))
}
