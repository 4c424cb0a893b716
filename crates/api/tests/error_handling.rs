//! `AppError` to HTTP response mapping, exercised without a server.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use quickcart_api::error::AppError;
use quickcart_core::error::CoreError;
use quickcart_core::roles::Role;
use quickcart_media::ImageStoreError;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn envelope_marks_failure() {
    let (_, json) = error_to_response(AppError::BadRequest("bad field".into())).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["message"], "bad field");
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn not_found_names_the_entity() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Product",
        id: 42,
    });
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], "Product not found");
}

#[tokio::test]
async fn identity_errors_are_400() {
    let err = CoreError::InvalidRole(Some("root".into()));
    let (status, json) = error_to_response(err.into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_ROLE");

    let (status, json) = error_to_response(CoreError::MissingPassword.into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MISSING_PASSWORD");
}

#[tokio::test]
async fn session_errors_are_401() {
    for (err, code) in [
        (CoreError::TokenMissing, "TOKEN_MISSING"),
        (CoreError::TokenInvalid, "TOKEN_INVALID"),
        (CoreError::TokenExpired, "TOKEN_EXPIRED"),
        (CoreError::AccountGone, "ACCOUNT_GONE"),
        (CoreError::InvalidCredentials, "INVALID_CREDENTIALS"),
    ] {
        let (status, json) = error_to_response(err.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["code"], code);
    }
}

#[tokio::test]
async fn email_exists_is_409() {
    let (status, json) = error_to_response(CoreError::EmailExists("a@x.com".into()).into()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "EMAIL_EXISTS");
}

#[tokio::test]
async fn account_not_found_names_the_role() {
    let err = CoreError::AccountNotFound { role: Role::Seller };
    let (status, json) = error_to_response(err.into()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "No account found with this email for role: seller");
}

#[tokio::test]
async fn forbidden_is_403() {
    let (status, json) = error_to_response(CoreError::Forbidden("nope".into()).into()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn internal_errors_hide_detail_in_message() {
    let (status, json) = error_to_response(AppError::InternalError("pool exhausted".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "An internal error occurred");
    assert_eq!(json["error"], "pool exhausted");
}

#[tokio::test]
async fn row_not_found_is_404() {
    let (status, _) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn other_database_errors_are_500() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn upload_failure_keeps_detail() {
    let err: AppError = ImageStoreError::MissingUrl.into();
    assert_matches!(err, AppError::Core(CoreError::ImageUploadFailed(_)));

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "IMAGE_UPLOAD_FAILED");
    assert!(json["error"].as_str().unwrap().contains("did not include a URL"));
}

#[tokio::test]
async fn unsupported_upload_type_is_validation() {
    let err: AppError = ImageStoreError::UnsupportedContentType("text/plain".into()).into();
    assert_matches!(err, AppError::Core(CoreError::Validation(_)));
}
