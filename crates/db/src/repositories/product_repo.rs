//! Repository for the `products` table.

use quickcart_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{
    CreateProduct, Product, ProductFilter, ProductSummary, ProductWithSeller, UpdateProduct,
};

const COLUMNS: &str =
    "id, seller_id, title, description, price, category, image_url, created_at, updated_at";

/// Product columns plus the owning seller's summary, aliased for `ProductWithSeller`.
const JOINED_COLUMNS: &str = "p.id, p.seller_id, p.title, p.description, p.price, p.category, \
                              p.image_url, p.created_at, p.updated_at, \
                              s.username AS seller_username, s.brand_name AS seller_brand_name, \
                              s.email AS seller_email";

const SUMMARY_COLUMNS: &str = "id, title, price, category, image_url, created_at";

/// Shared WHERE clause for listing and counting. Parameters:
/// `$1` search pattern, `$2` category, `$3` min price, `$4` max price, `$5` seller id.
const FILTER_CLAUSE: &str = "WHERE ($1::TEXT IS NULL OR p.title ILIKE $1 OR p.description ILIKE $1)
               AND ($2::TEXT IS NULL OR p.category = $2)
               AND ($3::NUMERIC IS NULL OR p.price >= $3)
               AND ($4::NUMERIC IS NULL OR p.price <= $4)
               AND ($5::BIGINT IS NULL OR p.seller_id = $5)";

/// Build an `ILIKE` pattern matching `term` anywhere, with wildcards in the
/// term itself escaped.
fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

pub struct ProductRepo;

impl ProductRepo {
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (seller_id, title, description, price, category, image_url)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(input.seller_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.category)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a product joined with its seller summary.
    pub async fn find_with_seller(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductWithSeller>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM products p
             JOIN sellers s ON s.id = p.seller_id
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, ProductWithSeller>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of products matching `filter`, plus the total match count.
    pub async fn list(
        pool: &PgPool,
        filter: &ProductFilter,
    ) -> Result<(Vec<ProductWithSeller>, i64), sqlx::Error> {
        let pattern = filter.search.as_deref().map(contains_pattern);

        // Sort column and direction come from whitelisted enums.
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM products p
             JOIN sellers s ON s.id = p.seller_id
             {FILTER_CLAUSE}
             ORDER BY p.{} {}, p.id {}
             LIMIT $6 OFFSET $7",
            filter.sort.column(),
            filter.order.keyword(),
            filter.order.keyword(),
        );
        let products = sqlx::query_as::<_, ProductWithSeller>(&query)
            .bind(&pattern)
            .bind(&filter.category)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(filter.seller_id)
            .bind(filter.page.limit)
            .bind(filter.page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM products p {FILTER_CLAUSE}");
        let (total,): (i64,) = sqlx::query_as(&count_query)
            .bind(&pattern)
            .bind(&filter.category)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(filter.seller_id)
            .fetch_one(pool)
            .await?;

        Ok((products, total))
    }

    /// All products of one seller with the seller summary, newest first.
    pub async fn list_by_seller(
        pool: &PgPool,
        seller_id: DbId,
    ) -> Result<Vec<ProductWithSeller>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM products p
             JOIN sellers s ON s.id = p.seller_id
             WHERE p.seller_id = $1
             ORDER BY p.created_at DESC, p.id DESC"
        );
        sqlx::query_as::<_, ProductWithSeller>(&query)
            .bind(seller_id)
            .fetch_all(pool)
            .await
    }

    /// All products of one seller in summary form, newest first.
    pub async fn list_summaries_by_seller(
        pool: &PgPool,
        seller_id: DbId,
    ) -> Result<Vec<ProductSummary>, sqlx::Error> {
        Self::recent_by_seller(pool, seller_id, i64::MAX).await
    }

    /// The `limit` newest products of one seller.
    pub async fn recent_by_seller(
        pool: &PgPool,
        seller_id: DbId,
        limit: i64,
    ) -> Result<Vec<ProductSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM products
             WHERE seller_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, ProductSummary>(&query)
            .bind(seller_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_seller(pool: &PgPool, seller_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products WHERE seller_id = $1")
            .bind(seller_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Apply the non-`None` fields. `seller_id` is never touched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                category = COALESCE($5, category),
                image_url = COALESCE($6, image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.category)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
