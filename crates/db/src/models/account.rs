//! The union of the two account tables.

use quickcart_core::error::CoreError;
use quickcart_core::types::DbId;
use serde::Serialize;

use crate::models::seller::{Seller, SellerResponse};
use crate::models::user::{User, UserResponse};

/// An account from either table.
#[derive(Debug, Clone)]
pub enum Account {
    Regular(User),
    Seller(Seller),
}

impl Account {
    pub fn id(&self) -> DbId {
        match self {
            Account::Regular(u) => u.id,
            Account::Seller(s) => s.id,
        }
    }

    pub fn password_hash(&self) -> &str {
        match self {
            Account::Regular(u) => &u.password_hash,
            Account::Seller(s) => &s.password_hash,
        }
    }
}

/// Password-free account shape for responses.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AccountResponse {
    Regular(UserResponse),
    Seller(SellerResponse),
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        match account {
            Account::Regular(u) => AccountResponse::Regular(u.into()),
            Account::Seller(s) => AccountResponse::Seller(s.into()),
        }
    }
}

/// Result of looking an email up in both tables.
#[derive(Debug, Clone, Default)]
pub struct EmailLookup {
    pub user: Option<User>,
    pub seller: Option<Seller>,
}

impl EmailLookup {
    pub fn is_taken(&self) -> bool {
        self.user.is_some() || self.seller.is_some()
    }

    /// Fail with `EmailExists` if either table holds the email.
    pub fn ensure_available(&self, email: &str) -> Result<(), CoreError> {
        if self.is_taken() {
            Err(CoreError::EmailExists(email.to_string()))
        } else {
            Ok(())
        }
    }
}
