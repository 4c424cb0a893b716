//! HTTP-level tests for purchases, the status lifecycle, and sales views.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_product, delete_auth, get, get_auth, patch_json_auth, post_json_auth,
    signup_admin, signup_seller, signup_user,
};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn buy(app: axum::Router, token: &str, product_id: i64, quantity: i32) -> Value {
    let body = json!({ "product_id": product_id, "quantity": quantity });
    let response = post_json_auth(app, "/api/sales", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn purchase_copies_price_and_seller(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (seller_id, seller) = signup_seller(app.clone(), "anna", "Anna").await;
    let (buyer_id, buyer) = signup_user(app.clone(), "bob").await;
    let product_id = create_product(app.clone(), &seller, "Lamp", "100", "Home").await;

    let json = buy(app, &buyer, product_id, 3).await;
    assert_eq!(json["message"], "Sale created successfully");
    let sale = &json["data"];
    assert_eq!(sale["total_price"], "300.00");
    assert_eq!(sale["status"], "pending");
    assert_eq!(sale["quantity"], 3);
    assert_eq!(sale["seller_id"], seller_id);
    assert_eq!(sale["buyer_id"], buyer_id);
    assert_eq!(sale["product_title"], "Lamp");
    assert_eq!(sale["seller_brand_name"], "Anna");
    assert_eq!(sale["buyer_username"], "bob");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn purchase_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, seller) = signup_seller(app.clone(), "anna", "Anna").await;
    let (_, buyer) = signup_user(app.clone(), "bob").await;
    let product_id = create_product(app.clone(), &seller, "Lamp", "100", "Home").await;

    let body = json!({ "product_id": product_id, "quantity": 0 });
    let response = post_json_auth(app.clone(), "/api/sales", &buyer, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json!({ "product_id": 9999, "quantity": 1 });
    let response = post_json_auth(app.clone(), "/api/sales", &buyer, body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json_auth(app.clone(), "/api/sales", &buyer, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Sellers do not buy.
    let body = json!({ "product_id": product_id, "quantity": 1 });
    let response = post_json_auth(app, "/api/sales", &seller, body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_sale_seller_or_admin_moves_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, seller) = signup_seller(app.clone(), "anna", "Anna").await;
    let (_, other_seller) = signup_seller(app.clone(), "ben", "Ben").await;
    let (_, buyer) = signup_user(app.clone(), "bob").await;
    let (_, admin) = signup_admin(app.clone()).await;
    let product_id = create_product(app.clone(), &seller, "Lamp", "100", "Home").await;
    let sale_id = buy(app.clone(), &buyer, product_id, 1).await["data"]["id"]
        .as_i64()
        .unwrap();
    let uri = format!("/api/sales/{sale_id}/status");

    let completed = json!({ "status": "completed" });
    let response = patch_json_auth(app.clone(), &uri, &buyer, completed.clone()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = patch_json_auth(app.clone(), &uri, &other_seller, completed.clone()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = json!({ "status": "shipped" });
    let response = patch_json_auth(app.clone(), &uri, &seller, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_json_auth(app.clone(), &uri, &seller, completed).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Sale status updated successfully");
    assert_eq!(json["data"]["status"], "completed");

    let response = patch_json_auth(app, &uri, &admin, json!({ "status": "cancelled" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "cancelled");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sale_visible_to_parties_and_admin_only(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, seller) = signup_seller(app.clone(), "anna", "Anna").await;
    let (_, buyer) = signup_user(app.clone(), "bob").await;
    let (_, stranger) = signup_user(app.clone(), "carl").await;
    let (_, admin) = signup_admin(app.clone()).await;
    let product_id = create_product(app.clone(), &seller, "Lamp", "100", "Home").await;
    let sale_id = buy(app.clone(), &buyer, product_id, 1).await["data"]["id"]
        .as_i64()
        .unwrap();
    let uri = format!("/api/sales/{sale_id}");

    for token in [&buyer, &seller, &admin] {
        let response = get_auth(app.clone(), &uri, token).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get_auth(app.clone(), &uri, &stranger).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/api/sales/9999", &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn party_views_and_stats(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, seller) = signup_seller(app.clone(), "anna", "Anna").await;
    let (_, buyer) = signup_user(app.clone(), "bob").await;
    let lamp = create_product(app.clone(), &seller, "Lamp", "100", "Home").await;
    let rug = create_product(app.clone(), &seller, "Rug", "50", "Home").await;
    buy(app.clone(), &buyer, lamp, 2).await;
    buy(app.clone(), &buyer, rug, 1).await;
    buy(app.clone(), &buyer, lamp, 1).await;

    let json = body_json(get_auth(app.clone(), "/api/sales/my-purchases", &buyer).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);

    let json = body_json(get_auth(app.clone(), "/api/sales/my-sales", &seller).await).await;
    let stats = &json["data"]["stats"];
    assert_eq!(stats["total_sales"], 3);
    assert_eq!(stats["total_revenue"], "350.00");
    assert_eq!(stats["sales_by_status"]["pending"], 3);
    assert_eq!(stats["top_products"]["Lamp"], 3);
    assert_eq!(stats["top_products"]["Rug"], 1);

    let response = get_auth(app, "/api/sales/my-sales", &buyer).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn brand_feed_is_public(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, seller) = signup_seller(app.clone(), "anna", "Anna Home").await;
    let (_, buyer) = signup_user(app.clone(), "bob").await;
    let lamp = create_product(app.clone(), &seller, "Lamp", "100", "Home").await;
    buy(app.clone(), &buyer, lamp, 1).await;

    let response = get(app.clone(), "/api/sales/brand/Anna%20Home").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["sales"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["stats"]["brand_name"], "Anna Home");
    assert_eq!(json["data"]["stats"]["total_sales"], 1);
    assert_eq!(json["data"]["stats"]["recent_sales"].as_array().unwrap().len(), 1);

    let response = get(app, "/api/sales/brand/Nobody").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Brand not found");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_lists_and_deletes_sales(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, seller) = signup_seller(app.clone(), "anna", "Anna").await;
    let (_, buyer) = signup_user(app.clone(), "bob").await;
    let (_, admin) = signup_admin(app.clone()).await;
    let lamp = create_product(app.clone(), &seller, "Lamp", "100", "Home").await;
    let sale_id = buy(app.clone(), &buyer, lamp, 1).await["data"]["id"].as_i64().unwrap();

    let response = get_auth(app.clone(), "/api/sales", &buyer).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(get_auth(app.clone(), "/api/sales", &admin).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let uri = format!("/api/sales/{sale_id}");
    let response = delete_auth(app.clone(), &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Sale deleted successfully");

    let response = delete_auth(app, &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sale_survives_product_deletion(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, seller) = signup_seller(app.clone(), "anna", "Anna").await;
    let (_, buyer) = signup_user(app.clone(), "bob").await;
    let lamp = create_product(app.clone(), &seller, "Lamp", "100", "Home").await;
    let sale_id = buy(app.clone(), &buyer, lamp, 2).await["data"]["id"].as_i64().unwrap();

    let response = delete_auth(app.clone(), &format!("/api/product/{lamp}"), &seller).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, &format!("/api/sales/{sale_id}"), &buyer).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total_price"], "200.00");
    assert!(json["data"]["product_title"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn purchase_total_beyond_column_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, seller) = signup_seller(app.clone(), "anna", "Anna").await;
    let (_, buyer) = signup_user(app.clone(), "bob").await;
    let product_id =
        create_product(app.clone(), &seller, "Yacht", "9999999999.99", "Marine").await;

    let body = json!({ "product_id": product_id, "quantity": 100 });
    let response = post_json_auth(app.clone(), "/api/sales", &buyer, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "Total price is out of range");

    let json = body_json(get_auth(app, "/api/sales/my-purchases", &buyer).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}
