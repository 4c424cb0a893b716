//! Regular account model and DTOs.

use chrono::NaiveDate;
use quickcart_core::roles::Role;
use quickcart_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full row from the `users` table.
///
/// Contains the password hash. Use [`UserResponse`] for anything that
/// leaves the server.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// User representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub role: Role,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            address: user.address,
            phone: user.phone,
            birth_date: user.birth_date,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for inserting a user. `role` must be `User` or `Admin`.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// Profile edit. Email, password, role, and id are not editable here;
/// unknown body keys such as those are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}
