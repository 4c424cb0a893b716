use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quickcart_core::error::CoreError;
use quickcart_media::ImageStoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the failure envelope
/// `{ success: false, message, code, error? }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `quickcart_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A lookup by something other than an id came up empty.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ImageStoreError> for AppError {
    fn from(err: ImageStoreError) -> Self {
        match err {
            ImageStoreError::UnsupportedContentType(content_type) => {
                AppError::Core(CoreError::Validation(format!(
                    "Only image files are allowed, got '{content_type}'"
                )))
            }
            other => AppError::Core(CoreError::ImageUploadFailed(other.to_string())),
        }
    }
}

/// Status, error code, client message, and optional diagnostic detail.
type Classified = (StatusCode, &'static str, String, Option<String>);

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, detail) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal(msg.clone())
            }
        };

        let mut body = json!({
            "success": false,
            "message": message,
            "code": code,
        });
        if let Some(detail) = detail {
            body["error"] = json!(detail);
        }

        (status, axum::Json(body)).into_response()
    }
}

fn internal(detail: String) -> Classified {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
        Some(detail),
    )
}

fn classify_core_error(err: &CoreError) -> Classified {
    match err {
        CoreError::NotFound { entity, .. } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} not found"),
            None,
        ),
        CoreError::Validation(msg) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
        }
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone(), None),
        CoreError::Unauthorized(msg) => {
            (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone(), None)
        }
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone(), None),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal(msg.clone())
        }
        CoreError::InvalidRole(_) => (
            StatusCode::BAD_REQUEST,
            "INVALID_ROLE",
            "Invalid role. Must be 'user' or 'seller'".to_string(),
            None,
        ),
        CoreError::MissingPassword => (
            StatusCode::BAD_REQUEST,
            "MISSING_PASSWORD",
            "Password is required".to_string(),
            None,
        ),
        CoreError::EmailExists(_) => (
            StatusCode::CONFLICT,
            "EMAIL_EXISTS",
            "Email already exists. Please use a different email or login instead.".to_string(),
            None,
        ),
        CoreError::AccountNotFound { .. } => (
            StatusCode::NOT_FOUND,
            "ACCOUNT_NOT_FOUND",
            err.to_string(),
            None,
        ),
        CoreError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            "INVALID_CREDENTIALS",
            "Invalid credentials".to_string(),
            None,
        ),
        CoreError::TokenMissing => (
            StatusCode::UNAUTHORIZED,
            "TOKEN_MISSING",
            "Access token required".to_string(),
            None,
        ),
        CoreError::TokenInvalid => (
            StatusCode::UNAUTHORIZED,
            "TOKEN_INVALID",
            "Invalid token".to_string(),
            None,
        ),
        CoreError::TokenExpired => (
            StatusCode::UNAUTHORIZED,
            "TOKEN_EXPIRED",
            "Token expired".to_string(),
            None,
        ),
        CoreError::AccountGone => (
            StatusCode::UNAUTHORIZED,
            "ACCOUNT_GONE",
            "Account no longer exists".to_string(),
            None,
        ),
        CoreError::ImageUploadFailed(detail) => {
            tracing::warn!(error = %detail, "Image upload failed");
            (
                StatusCode::BAD_REQUEST,
                "IMAGE_UPLOAD_FAILED",
                "Failed to upload product image".to_string(),
                Some(detail.clone()),
            )
        }
    }
}

/// Classify a sqlx error into the failure envelope.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a generic message.
fn classify_sqlx_error(err: &sqlx::Error) -> Classified {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
            None,
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return conflict_for_constraint(constraint);
                }
            }
            // 22003 numeric_value_out_of_range
            if db_err.code().as_deref() == Some("22003") {
                return (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "A numeric value is out of range".to_string(),
                    None,
                );
            }
            tracing::error!(error = %db_err, "Database error");
            internal(db_err.to_string())
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal(other.to_string())
        }
    }
}

fn conflict_for_constraint(constraint: &str) -> Classified {
    match constraint {
        "uq_users_email" | "uq_sellers_email" => (
            StatusCode::CONFLICT,
            "EMAIL_EXISTS",
            "Email already exists. Please use a different email or login instead.".to_string(),
            None,
        ),
        "uq_sellers_brand_name" => (
            StatusCode::CONFLICT,
            "CONFLICT",
            "Brand name already exists".to_string(),
            None,
        ),
        other => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Duplicate value violates unique constraint: {other}"),
            None,
        ),
    }
}
