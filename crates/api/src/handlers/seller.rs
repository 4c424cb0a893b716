//! Handlers for the `/seller` resource.

use axum::extract::{Path, State};
use axum::Json;
use quickcart_core::access::check_self_or_admin;
use quickcart_core::error::CoreError;
use quickcart_core::roles::AccountKind;
use quickcart_core::types::DbId;
use quickcart_core::validation::validate_name;
use quickcart_db::models::product::{ProductSummary, ProductWithSeller};
use quickcart_db::models::seller::{
    CategoryCount, Seller, SellerResponse, SellerWithProducts, UpdateSeller,
};
use quickcart_db::repositories::{ProductRepo, SellerRepo};
use quickcart_db::DbPool;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireSeller};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Number of products shown on the seller dashboard.
const RECENT_PRODUCTS: i64 = 5;

#[derive(Debug, Serialize)]
pub struct SellerStats {
    pub total_products: i64,
    pub brand_name: String,
    pub products_by_category: Vec<CategoryCount>,
    pub recent_products: Vec<ProductSummary>,
}

#[derive(Debug, Serialize)]
pub struct DeletedSeller {
    pub deleted_seller_id: DbId,
    pub deleted_products: u64,
}

async fn load_seller(pool: &DbPool, id: DbId) -> AppResult<Seller> {
    let seller = SellerRepo::find_by_id(pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Seller",
            id,
        })?;
    Ok(seller)
}

async fn with_products(pool: &DbPool, seller: Seller) -> AppResult<SellerWithProducts> {
    let products = ProductRepo::list_summaries_by_seller(pool, seller.id).await?;
    Ok(SellerWithProducts {
        seller: seller.into(),
        products,
    })
}

/// GET /api/seller/profile
pub async fn profile(
    State(state): State<AppState>,
    RequireSeller(user): RequireSeller,
) -> AppResult<Json<ApiResponse<SellerWithProducts>>> {
    let seller = load_seller(&state.pool, user.account_id).await?;
    Ok(Json(ApiResponse::data(
        with_products(&state.pool, seller).await?,
    )))
}

/// GET /api/seller/stats
pub async fn stats(
    State(state): State<AppState>,
    RequireSeller(user): RequireSeller,
) -> AppResult<Json<ApiResponse<SellerStats>>> {
    let seller = load_seller(&state.pool, user.account_id).await?;

    let total_products = ProductRepo::count_by_seller(&state.pool, seller.id).await?;
    let products_by_category = SellerRepo::category_counts(&state.pool, seller.id).await?;
    let recent_products =
        ProductRepo::recent_by_seller(&state.pool, seller.id, RECENT_PRODUCTS).await?;

    Ok(Json(ApiResponse::data(SellerStats {
        total_products,
        brand_name: seller.brand_name,
        products_by_category,
        recent_products,
    })))
}

/// GET /api/seller/products
pub async fn products(
    State(state): State<AppState>,
    RequireSeller(user): RequireSeller,
) -> AppResult<Json<ApiResponse<Vec<ProductWithSeller>>>> {
    let products = ProductRepo::list_by_seller(&state.pool, user.account_id).await?;
    Ok(Json(ApiResponse::data(products)))
}

/// GET /api/seller
pub async fn list_sellers(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<Vec<SellerWithProducts>>>> {
    let sellers = SellerRepo::list(&state.pool).await?;
    let mut result = Vec::with_capacity(sellers.len());
    for seller in sellers {
        result.push(with_products(&state.pool, seller).await?);
    }
    Ok(Json(ApiResponse::data(result)))
}

/// GET /api/seller/{id}
pub async fn get_seller(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<SellerWithProducts>>> {
    check_self_or_admin(&user.actor(), AccountKind::Seller, id)?;
    let seller = load_seller(&state.pool, id).await?;
    Ok(Json(ApiResponse::data(
        with_products(&state.pool, seller).await?,
    )))
}

/// PATCH /api/seller/{id}
///
/// Email, password, and id are not editable. A new brand name must not be
/// held by another seller.
pub async fn update_seller(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateSeller>,
) -> AppResult<Json<ApiResponse<SellerResponse>>> {
    check_self_or_admin(&user.actor(), AccountKind::Seller, id)?;

    if let Some(username) = &input.username {
        validate_name("username", username)?;
    }
    if let Some(brand_name) = input.brand_name.take() {
        let brand_name = brand_name.trim().to_string();
        validate_name("brand_name", &brand_name)?;
        if let Some(holder) = SellerRepo::find_by_brand_name(&state.pool, &brand_name).await? {
            if holder.id != id {
                return Err(CoreError::Conflict("Brand name already exists".into()).into());
            }
        }
        input.brand_name = Some(brand_name);
    }

    let seller = SellerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Seller",
            id,
        })?;

    tracing::info!(
        seller_id = id,
        account_id = user.account_id,
        role = %user.role,
        "Seller updated"
    );

    Ok(Json(ApiResponse::with_message(
        "Seller updated successfully",
        seller.into(),
    )))
}

/// DELETE /api/seller/{id}
///
/// Removes the seller and every product they list in one transaction. Sales
/// that reference those products are kept.
pub async fn delete_seller(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<DeletedSeller>>> {
    check_self_or_admin(&user.actor(), AccountKind::Seller, id)?;

    let deleted_products = SellerRepo::delete_with_products(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Seller",
            id,
        })?;

    Ok(Json(ApiResponse::with_message(
        "Seller and associated products deleted successfully",
        DeletedSeller {
            deleted_seller_id: id,
            deleted_products,
        },
    )))
}
