//! Repository for the `sellers` table.

use quickcart_core::types::DbId;
use sqlx::PgPool;

use crate::models::seller::{CategoryCount, CreateSeller, Seller, UpdateSeller};

const COLUMNS: &str = "id, username, first_name, last_name, email, password_hash, brand_name, \
                       address, phone, birth_date, created_at, updated_at";

pub struct SellerRepo;

impl SellerRepo {
    pub async fn create(pool: &PgPool, input: &CreateSeller) -> Result<Seller, sqlx::Error> {
        let query = format!(
            "INSERT INTO sellers
                (username, first_name, last_name, email, password_hash, brand_name,
                 address, phone, birth_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Seller>(&query)
            .bind(&input.username)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.brand_name)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(input.birth_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Seller>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sellers WHERE id = $1");
        sqlx::query_as::<_, Seller>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Seller>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sellers WHERE email = $1");
        sqlx::query_as::<_, Seller>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_brand_name(
        pool: &PgPool,
        brand_name: &str,
    ) -> Result<Option<Seller>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sellers WHERE brand_name = $1");
        sqlx::query_as::<_, Seller>(&query)
            .bind(brand_name)
            .fetch_optional(pool)
            .await
    }

    /// List all sellers, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Seller>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sellers ORDER BY created_at DESC");
        sqlx::query_as::<_, Seller>(&query).fetch_all(pool).await
    }

    /// Apply the non-`None` profile fields.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSeller,
    ) -> Result<Option<Seller>, sqlx::Error> {
        let query = format!(
            "UPDATE sellers SET
                username = COALESCE($2, username),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                brand_name = COALESCE($5, brand_name),
                address = COALESCE($6, address),
                phone = COALESCE($7, phone),
                birth_date = COALESCE($8, birth_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Seller>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.brand_name)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(input.birth_date)
            .fetch_optional(pool)
            .await
    }

    pub async fn update_email(
        pool: &PgPool,
        id: DbId,
        email: &str,
    ) -> Result<Option<Seller>, sqlx::Error> {
        let query = format!("UPDATE sellers SET email = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Seller>(&query)
            .bind(id)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE sellers SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a seller and every product they list, in one transaction.
    ///
    /// Returns the number of products removed, or `None` (and nothing
    /// deleted) if the seller does not exist.
    pub async fn delete_with_products(pool: &PgPool, id: DbId) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let products = sqlx::query("DELETE FROM products WHERE seller_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let sellers = sqlx::query("DELETE FROM sellers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if sellers == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        tracing::info!(seller_id = id, products_deleted = products, "Seller deleted with catalog");
        Ok(Some(products))
    }

    /// Product counts per category for one seller, largest first.
    pub async fn category_counts(
        pool: &PgPool,
        seller_id: DbId,
    ) -> Result<Vec<CategoryCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryCount>(
            "SELECT category, COUNT(*) AS count
             FROM products
             WHERE seller_id = $1
             GROUP BY category
             ORDER BY count DESC, category ASC",
        )
        .bind(seller_id)
        .fetch_all(pool)
        .await
    }
}
