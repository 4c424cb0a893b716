//! Account roles and the collection each role lives in.
//!
//! The string forms must match the `users.role` CHECK constraint in
//! `20260301000002_create_accounts.sql` and the `role` claim in session tokens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_USER: &str = "user";
pub const ROLE_SELLER: &str = "seller";
pub const ROLE_ADMIN: &str = "admin";

/// The role granted to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Seller,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Seller => ROLE_SELLER,
            Role::Admin => ROLE_ADMIN,
        }
    }

    /// Which account table holds accounts with this role.
    ///
    /// Admins are regular accounts; only sellers live in their own table.
    pub fn account_kind(self) -> AccountKind {
        match self {
            Role::User | Role::Admin => AccountKind::Regular,
            Role::Seller => AccountKind::Seller,
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_USER => Ok(Role::User),
            ROLE_SELLER => Ok(Role::Seller),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(format!("Unknown role '{other}'")),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse().map_err(CoreError::Validation)
    }
}

/// The two disjoint account collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Buyers and the administrator (`users` table).
    Regular,
    /// Sellers (`sellers` table).
    Seller,
}

impl AccountKind {
    /// Entity name used in not-found errors.
    pub fn entity_name(self) -> &'static str {
        match self {
            AccountKind::Regular => "User",
            AccountKind::Seller => "Seller",
        }
    }
}
