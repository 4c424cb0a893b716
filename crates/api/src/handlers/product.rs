//! Handlers for the `/product` resource.
//!
//! Create and update take `multipart/form-data` so an image file can travel
//! with the fields. The image goes to the configured [`ImageStore`] and only
//! the returned URL is stored.
//!
//! [`ImageStore`]: quickcart_media::ImageStore

use std::str::FromStr;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use quickcart_core::error::CoreError;
use quickcart_core::listing::{
    normalize_category, normalize_search, PageRequest, Pagination, SortField, SortOrder,
    DEFAULT_CATEGORY,
};
use quickcart_core::types::DbId;
use quickcart_core::validation::{validate_name, validate_price};
use quickcart_db::models::product::{
    CreateProduct, ProductFilter, ProductWithSeller, UpdateProduct,
};
use quickcart_db::repositories::ProductRepo;
use quickcart_media::{is_image_content_type, ImageUpload};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::ownership::load_owned_product;
use crate::middleware::rbac::{RequireSeller, RequireSellerOrAdmin};
use crate::query::{ProductListParams, SellerProductsParams};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Multipart field carrying the image file.
const IMAGE_FIELD: &str = "product_image";

#[derive(Debug, Serialize)]
pub struct ProductPage<F: Serialize> {
    pub products: Vec<ProductWithSeller>,
    pub pagination: Pagination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<F>,
}

#[derive(Debug, Serialize)]
pub struct DeletedProduct {
    pub deleted_product_id: DbId,
}

/// Product fields as they arrive in a multipart form. Blank text fields
/// count as absent.
#[derive(Debug, Default)]
struct ProductForm {
    title: Option<String>,
    description: Option<String>,
    price: Option<String>,
    category: Option<String>,
    image: Option<ImageUpload>,
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("Malformed multipart body: {err}"))
}

async fn read_product_form(mut multipart: Multipart) -> AppResult<ProductForm> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == IMAGE_FIELD || name == "productImage" {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await.map_err(multipart_error)?;
            if !bytes.is_empty() {
                form.image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field.text().await.map_err(multipart_error)?;
        let value = Some(value.trim().to_string()).filter(|v| !v.is_empty());
        match name.as_str() {
            "title" => form.title = value,
            "description" => form.description = value,
            "price" => form.price = value,
            "category" => form.category = value,
            _ => {}
        }
    }

    Ok(form)
}

fn parse_price(raw: &str) -> Result<Decimal, CoreError> {
    let price = Decimal::from_str(raw)
        .map_err(|_| CoreError::Validation(format!("Price '{raw}' is not a valid number")))?;
    validate_price(price)?;
    Ok(price)
}

/// Upload the image, if one was sent, and return its URL.
async fn store_image(state: &AppState, image: Option<ImageUpload>) -> AppResult<Option<String>> {
    let Some(image) = image else {
        return Ok(None);
    };
    if !is_image_content_type(&image.content_type) {
        return Err(CoreError::Validation("Only image files are allowed".into()).into());
    }
    let url = state.images.upload(image).await?;
    Ok(Some(url))
}

async fn load_with_seller(state: &AppState, id: DbId) -> AppResult<ProductWithSeller> {
    let product = ProductRepo::find_with_seller(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Product",
            id,
        })?;
    Ok(product)
}

/// POST /api/product
pub async fn create_product(
    State(state): State<AppState>,
    RequireSeller(user): RequireSeller,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<ProductWithSeller>>)> {
    let form = read_product_form(multipart).await?;

    let (Some(title), Some(price)) = (form.title, form.price) else {
        return Err(CoreError::Validation("Title and price are required".into()).into());
    };
    validate_name("title", &title)?;
    let price = parse_price(&price)?;

    let image_url = store_image(&state, form.image).await?;

    let input = CreateProduct {
        seller_id: user.account_id,
        title,
        description: form.description,
        price,
        category: form.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        image_url,
    };
    let product = ProductRepo::create(&state.pool, &input).await?;

    tracing::info!(product_id = product.id, seller_id = user.account_id, "Product created");

    let product = load_with_seller(&state, product.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Product created successfully", product)),
    ))
}

/// GET /api/product
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<Json<ApiResponse<ProductPage<ProductListParams>>>> {
    let sort = params
        .sort_by
        .as_deref()
        .map(SortField::from_str)
        .transpose()?
        .unwrap_or_default();
    let order = params
        .order
        .as_deref()
        .map(SortOrder::from_str)
        .transpose()?
        .unwrap_or_default();
    let page = PageRequest::new(params.page, params.limit);

    let filter = ProductFilter {
        search: normalize_search(params.search.as_deref()),
        category: normalize_category(params.category.as_deref()),
        min_price: params.min_price,
        max_price: params.max_price,
        seller_id: None,
        sort,
        order,
        page,
    };
    let (products, total) = ProductRepo::list(&state.pool, &filter).await?;

    Ok(Json(ApiResponse::data(ProductPage {
        products,
        pagination: Pagination::new(page, total),
        filters: Some(params),
    })))
}

/// GET /api/product/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<ProductWithSeller>>> {
    let product = load_with_seller(&state, id).await?;
    Ok(Json(ApiResponse::data(product)))
}

/// PATCH /api/product/{id}
///
/// Any subset of fields may be sent. The owning seller never changes.
pub async fn update_product(
    State(state): State<AppState>,
    RequireSellerOrAdmin(user): RequireSellerOrAdmin,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<ProductWithSeller>>> {
    load_owned_product(&state.pool, &user.actor(), id).await?;

    let form = read_product_form(multipart).await?;
    if let Some(title) = &form.title {
        validate_name("title", title)?;
    }
    let price = form.price.as_deref().map(parse_price).transpose()?;
    let image_url = store_image(&state, form.image).await?;

    let input = UpdateProduct {
        title: form.title,
        description: form.description,
        price,
        category: form.category,
        image_url,
    };
    ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Product",
            id,
        })?;

    tracing::info!(
        product_id = id,
        account_id = user.account_id,
        role = %user.role,
        "Product updated"
    );

    let product = load_with_seller(&state, id).await?;
    Ok(Json(ApiResponse::with_message(
        "Product updated successfully",
        product,
    )))
}

/// DELETE /api/product/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    RequireSellerOrAdmin(user): RequireSellerOrAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<DeletedProduct>>> {
    load_owned_product(&state.pool, &user.actor(), id).await?;

    if !ProductRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "Product",
            id,
        }
        .into());
    }

    tracing::info!(
        product_id = id,
        account_id = user.account_id,
        role = %user.role,
        "Product deleted"
    );

    Ok(Json(ApiResponse::with_message(
        "Product deleted successfully",
        DeletedProduct {
            deleted_product_id: id,
        },
    )))
}

/// GET /api/product/seller/my-products
pub async fn my_products(
    State(state): State<AppState>,
    RequireSeller(user): RequireSeller,
    Query(params): Query<SellerProductsParams>,
) -> AppResult<Json<ApiResponse<ProductPage<()>>>> {
    let page = PageRequest::new(params.page, params.limit);
    let filter = ProductFilter {
        search: normalize_search(params.search.as_deref()),
        seller_id: Some(user.account_id),
        page,
        ..ProductFilter::default()
    };
    let (products, total) = ProductRepo::list(&state.pool, &filter).await?;

    Ok(Json(ApiResponse::data(ProductPage {
        products,
        pagination: Pagination::new(page, total),
        filters: None,
    })))
}

