//! Argon2id password hashing and verification.
//!
//! Hashes are stored in PHC string format so parameters and salt travel with
//! the hash. The async wrappers move the work onto the blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use quickcart_core::error::CoreError;

/// Minimum accepted password length at signup and password change.
pub const MIN_PASSWORD_LENGTH: usize = 6;

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Returns `Ok(false)` on mismatch; `Err` only for an unparseable hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

pub async fn hash_password_async(password: String) -> Result<String, CoreError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| CoreError::Internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| CoreError::Internal(format!("Password hashing failed: {e}")))
}

pub async fn verify_password_async(password: String, hash: String) -> Result<bool, CoreError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| CoreError::Internal(format!("Password verification task failed: {e}")))?
        .map_err(|e| CoreError::Internal(format!("Stored password hash is unreadable: {e}")))
}
