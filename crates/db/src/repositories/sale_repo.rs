//! Repository for the `sales` table.

use quickcart_core::sales::SaleStatus;
use quickcart_core::types::DbId;
use sqlx::PgPool;

use crate::models::sale::{CreateSale, Sale, SaleDetail};

const COLUMNS: &str = "id, product_id, seller_id, buyer_id, quantity, total_price, status, \
                       created_at, updated_at";

/// Sale columns with display fields from the (possibly deleted) product,
/// seller, and buyer.
const DETAIL_SELECT: &str = "SELECT sa.id, sa.product_id, sa.seller_id, sa.buyer_id, sa.quantity, \
                                    sa.total_price, sa.status, sa.created_at, sa.updated_at, \
                                    p.title AS product_title, p.image_url AS product_image_url, \
                                    se.brand_name AS seller_brand_name, \
                                    u.username AS buyer_username, u.email AS buyer_email
                             FROM sales sa
                             LEFT JOIN products p ON p.id = sa.product_id
                             LEFT JOIN sellers se ON se.id = sa.seller_id
                             LEFT JOIN users u ON u.id = sa.buyer_id";

pub struct SaleRepo;

impl SaleRepo {
    /// Record a purchase with status `pending`.
    pub async fn create(pool: &PgPool, input: &CreateSale) -> Result<Sale, sqlx::Error> {
        let query = format!(
            "INSERT INTO sales (product_id, seller_id, buyer_id, quantity, total_price, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sale>(&query)
            .bind(input.product_id)
            .bind(input.seller_id)
            .bind(input.buyer_id)
            .bind(input.quantity)
            .bind(input.total_price)
            .bind(SaleStatus::Pending.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sale>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sales WHERE id = $1");
        sqlx::query_as::<_, Sale>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<SaleDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE sa.id = $1");
        sqlx::query_as::<_, SaleDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every sale, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<SaleDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} ORDER BY sa.created_at DESC, sa.id DESC");
        sqlx::query_as::<_, SaleDetail>(&query).fetch_all(pool).await
    }

    /// Sales made by one seller, newest first.
    pub async fn list_by_seller(
        pool: &PgPool,
        seller_id: DbId,
    ) -> Result<Vec<SaleDetail>, sqlx::Error> {
        let query = format!(
            "{DETAIL_SELECT} WHERE sa.seller_id = $1 ORDER BY sa.created_at DESC, sa.id DESC"
        );
        sqlx::query_as::<_, SaleDetail>(&query)
            .bind(seller_id)
            .fetch_all(pool)
            .await
    }

    /// Purchases made by one buyer, newest first.
    pub async fn list_by_buyer(
        pool: &PgPool,
        buyer_id: DbId,
    ) -> Result<Vec<SaleDetail>, sqlx::Error> {
        let query = format!(
            "{DETAIL_SELECT} WHERE sa.buyer_id = $1 ORDER BY sa.created_at DESC, sa.id DESC"
        );
        sqlx::query_as::<_, SaleDetail>(&query)
            .bind(buyer_id)
            .fetch_all(pool)
            .await
    }

    /// Set the status of a sale. Returns `None` if no row with `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: SaleStatus,
    ) -> Result<Option<Sale>, sqlx::Error> {
        let query = format!("UPDATE sales SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Sale>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
