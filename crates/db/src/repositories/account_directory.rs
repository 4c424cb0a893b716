//! Lookups spanning both account tables.
//!
//! Signup, email changes, and session revalidation go through here so the
//! cross-table email rule is checked in one place.

use quickcart_core::roles::AccountKind;
use quickcart_core::types::DbId;
use sqlx::PgPool;

use crate::models::account::{Account, EmailLookup};
use crate::repositories::{SellerRepo, UserRepo};

pub struct AccountDirectory;

impl AccountDirectory {
    /// Look `email` up in both tables.
    ///
    /// Both queries always run, even when the first one matches.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<EmailLookup, sqlx::Error> {
        let user = UserRepo::find_by_email(pool, email).await?;
        let seller = SellerRepo::find_by_email(pool, email).await?;
        Ok(EmailLookup { user, seller })
    }

    /// Look `email` up in the one table `kind` names.
    pub async fn find_in(
        pool: &PgPool,
        kind: AccountKind,
        email: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        Ok(match kind {
            AccountKind::Regular => UserRepo::find_by_email(pool, email)
                .await?
                .map(Account::Regular),
            AccountKind::Seller => SellerRepo::find_by_email(pool, email)
                .await?
                .map(Account::Seller),
        })
    }

    pub async fn find_by_id(
        pool: &PgPool,
        kind: AccountKind,
        id: DbId,
    ) -> Result<Option<Account>, sqlx::Error> {
        Ok(match kind {
            AccountKind::Regular => UserRepo::find_by_id(pool, id).await?.map(Account::Regular),
            AccountKind::Seller => SellerRepo::find_by_id(pool, id).await?.map(Account::Seller),
        })
    }

    /// Whether the account `(kind, id)` still exists.
    pub async fn exists(pool: &PgPool, kind: AccountKind, id: DbId) -> Result<bool, sqlx::Error> {
        let query = match kind {
            AccountKind::Regular => "SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)",
            AccountKind::Seller => "SELECT EXISTS (SELECT 1 FROM sellers WHERE id = $1)",
        };
        let (exists,): (bool,) = sqlx::query_as(query).bind(id).fetch_one(pool).await?;
        Ok(exists)
    }

    /// Set a new email. The caller checks availability first.
    pub async fn update_email(
        pool: &PgPool,
        kind: AccountKind,
        id: DbId,
        email: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        Ok(match kind {
            AccountKind::Regular => UserRepo::update_email(pool, id, email)
                .await?
                .map(Account::Regular),
            AccountKind::Seller => SellerRepo::update_email(pool, id, email)
                .await?
                .map(Account::Seller),
        })
    }

    pub async fn update_password(
        pool: &PgPool,
        kind: AccountKind,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        match kind {
            AccountKind::Regular => UserRepo::update_password(pool, id, password_hash).await,
            AccountKind::Seller => SellerRepo::update_password(pool, id, password_hash).await,
        }
    }
}
