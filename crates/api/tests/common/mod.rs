#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use quickcart_api::auth::jwt::JwtConfig;
use quickcart_api::config::ServerConfig;
use quickcart_api::router::build_app_router;
use quickcart_api::state::AppState;
use quickcart_core::identity::AdminPolicy;
use quickcart_media::{ImageStore, ImageStoreError, ImageUpload};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@email.com";
pub const PASSWORD: &str = "pw123456";

/// Stand-in asset host. Returns a predictable URL, or fails for files whose
/// name contains `fail`.
pub struct StubImageStore;

#[async_trait]
impl ImageStore for StubImageStore {
    async fn upload(&self, image: ImageUpload) -> Result<String, ImageStoreError> {
        if image.file_name.contains("fail") {
            return Err(ImageStoreError::HttpStatus {
                status: 500,
                body: "stub upload failure".to_string(),
            });
        }
        Ok(format!("https://images.test/{}", image.file_name))
    }
}

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_hours: 24,
        },
        admin: AdminPolicy::new(ADMIN_EMAIL),
        secure_cookies: false,
        cloudinary: None,
    }
}

/// Build the full application router, with the stub image store, over the
/// given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        images: Arc::new(StubImageStore),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        request(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// GET carrying the token in the `authToken` cookie instead of a header.
pub async fn get_with_cookie(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(COOKIE, format!("authToken={token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    json_request(app, Method::POST, uri, None, body).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    json_request(app, Method::POST, uri, Some(token), body).await
}

pub async fn patch_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    json_request(app, Method::PATCH, uri, Some(token), body).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        request(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response<Body> {
    let request = request(method, uri, token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// A file part for [`multipart_auth`].
pub struct FilePart<'a> {
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

const BOUNDARY: &str = "quickcart-test-boundary";

fn multipart_body(fields: &[(&str, &str)], file: Option<FilePart<'_>>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"product_image\"; \
                 filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.file_name, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn multipart_auth(
    app: Router,
    method: Method,
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
    file: Option<FilePart<'_>>,
) -> Response<Body> {
    let request = request(method, uri, Some(token))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields, file)))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Sign up through the API and return `(account id, token)`.
pub async fn signup(app: Router, role: &str, body: Value) -> (i64, String) {
    let response = post_json(app, &format!("/api/auth/signup?role={role}"), body).await;
    let status = response.status();
    let json = body_json(response).await;
    assert_eq!(status, axum::http::StatusCode::CREATED, "signup failed: {json}");
    (
        json["data"]["account"]["id"].as_i64().unwrap(),
        json["data"]["token"].as_str().unwrap().to_string(),
    )
}

pub async fn signup_user(app: Router, username: &str) -> (i64, String) {
    signup(
        app,
        "user",
        json!({
            "username": username,
            "email": format!("{username}@test.com"),
            "password": PASSWORD,
        }),
    )
    .await
}

pub async fn signup_seller(app: Router, username: &str, brand_name: &str) -> (i64, String) {
    signup(
        app,
        "seller",
        json!({
            "username": username,
            "email": format!("{username}@test.com"),
            "password": PASSWORD,
            "brand_name": brand_name,
        }),
    )
    .await
}

pub async fn signup_admin(app: Router) -> (i64, String) {
    signup(
        app,
        "user",
        json!({
            "username": "admin",
            "email": ADMIN_EMAIL,
            "password": PASSWORD,
        }),
    )
    .await
}

/// Create a product as `token`'s seller and return its id.
pub async fn create_product(
    app: Router,
    token: &str,
    title: &str,
    price: &str,
    category: &str,
) -> i64 {
    let response = multipart_auth(
        app,
        Method::POST,
        "/api/product",
        token,
        &[("title", title), ("price", price), ("category", category)],
        None,
    )
    .await;
    let status = response.status();
    let json = body_json(response).await;
    assert_eq!(status, axum::http::StatusCode::CREATED, "create product failed: {json}");
    json["data"]["id"].as_i64().unwrap()
}
