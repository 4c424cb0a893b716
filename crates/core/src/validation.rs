//! Field-level validation shared by signup, profile edits, and the catalog.

use rust_decimal::Decimal;
use validator::ValidateEmail;

use crate::error::CoreError;

/// Maximum length of free-text display fields (username, title, brand name).
pub const MAX_NAME_LENGTH: usize = 200;

/// Require a well-formed email address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}

/// Require a non-blank field no longer than [`MAX_NAME_LENGTH`].
pub fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Largest value `products.price` (`NUMERIC(12,2)`) can hold.
pub fn max_price() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// Prices are non-negative and fit the column once rounded to cents.
pub fn validate_price(price: Decimal) -> Result<(), CoreError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(CoreError::Validation("Price must not be negative".into()));
    }
    if price.round_dp(2) > max_price() {
        return Err(CoreError::Validation(format!(
            "Price must be at most {}",
            max_price()
        )));
    }
    Ok(())
}
