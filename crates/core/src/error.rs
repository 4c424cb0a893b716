use crate::roles::Role;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// The `role` hint was neither `user` nor `seller` and the email is not the admin address.
    #[error("Invalid role: {0:?}")]
    InvalidRole(Option<String>),

    #[error("Password is required")]
    MissingPassword,

    /// The email is already bound to an account in either collection.
    #[error("Email already exists: {0}")]
    EmailExists(String),

    #[error("No account found with this email for role: {role}")]
    AccountNotFound { role: Role },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Access token required")]
    TokenMissing,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token expired")]
    TokenExpired,

    /// The token verified but the account it names no longer exists.
    #[error("Account no longer exists")]
    AccountGone,

    #[error("Image upload failed: {0}")]
    ImageUploadFailed(String),
}
