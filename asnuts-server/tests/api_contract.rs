//! REST 接口契约测试
//!
//! 通过 `tower::ServiceExt::oneshot` 直接驱动路由，使用内存数据库。

mod common;

use asnuts_server::Config;
use common::*;
use http::{Method, StatusCode};
use serde_json::json;

// ========== Health ==========

#[tokio::test]
async fn test_health_is_public() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// ========== Auth ==========

#[tokio::test]
async fn test_register_assigns_role_by_owner_email() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({ "name": "Owner", "email": "Owner@ASNuts.com", "password": OWNER_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["role"], "owner");
    assert_eq!(body["user"]["email"], "owner@asnuts.com");
    assert!(body["user"].get("passwordHash").is_none());

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({ "name": "Priya", "email": "priya@example.com", "password": "cashew123" })),
    )
    .await;
    assert_eq!(body["user"]["role"], "customer");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = test_app().await;
    customer_token(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({ "name": "Again", "email": "PRIYA@example.com", "password": "another1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 1101);
    assert_eq!(body["message"], "User already exists with this email");
}

#[tokio::test]
async fn test_register_validation() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({ "name": "Short", "email": "short@example.com", "password": "123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1102);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({ "name": "", "email": "x@example.com", "password": "123456" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "name");
}

#[tokio::test]
async fn test_login_success_and_bad_credentials() {
    let app = test_app().await;
    owner_token(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": OWNER_EMAIL, "password": OWNER_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["role"], "owner");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": OWNER_EMAIL, "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "whatever" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_configured_owner_password_seeds_owner_account() {
    let mut config = Config::for_tests(OWNER_EMAIL);
    config.owner_password = Some(OWNER_PASSWORD.to_string());
    let app = test_app_with(config).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({ "name": "Squatter", "email": OWNER_EMAIL, "password": "takeover1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 1101);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": OWNER_EMAIL, "password": OWNER_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "owner");
    assert_eq!(body["user"]["name"], "AS Nuts Owner");
}

// ========== Products ==========

#[tokio::test]
async fn test_products_list_is_public_and_empty_initially() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_product_mutations_require_owner() {
    let app = test_app().await;
    let customer = customer_token(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/products",
        None,
        Some(product_json("Batham Cashew Nuts", 140)),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(&customer),
        Some(product_json("Batham Cashew Nuts", 140)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Only owners can add products");

    let (status, _) = send(
        &app,
        Method::DELETE,
        "/api/products/batham",
        Some("not-a-jwt"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_product_crud_lifecycle() {
    let app = test_app().await;
    let owner = owner_token(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(&owner),
        Some(product_json("W-180 Premium Cashews", 160)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Product added successfully");
    assert_eq!(body["product"]["id"], "w-180-premium-cashews");
    assert_eq!(body["product"]["price"], 160);

    // 同名商品的 slug 冲突
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(&owner),
        Some(product_json("W-180 Premium Cashews", 170)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6003);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/products/w-180-premium-cashews",
        Some(&owner),
        Some(json!({ "price": 175, "badge": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["price"], 175);
    assert!(body["product"]["badge"].is_null());
    assert_eq!(body["product"]["name"], "W-180 Premium Cashews");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/products/w-180-premium-cashews",
        Some(&owner),
        Some(json!({ "price": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/products/missing",
        Some(&owner),
        Some(json!({ "price": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/api/products/w-180-premium-cashews",
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted successfully");

    let (status, _) = send(
        &app,
        Method::DELETE,
        "/api/products/w-180-premium-cashews",
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_create_validation() {
    let app = test_app().await;
    let owner = owner_token(&app).await;

    let mut missing_image = product_json("Kaju", 130);
    missing_image["image"] = json!("");
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(&owner),
        Some(missing_image),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "image");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(&owner),
        Some(product_json("Kaju", -5)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Price must be greater than 0");
}

#[tokio::test]
async fn test_product_explicit_id_must_be_slug() {
    let app = test_app().await;
    let owner = owner_token(&app).await;

    for id in ["hazel/nuts", "hazel?x=1", "Hazel", "hazel nuts"] {
        let mut payload = product_json("Hazel Nuts", 120);
        payload["id"] = json!(id);
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/products",
            Some(&owner),
            Some(payload),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "id {id:?}");
        assert_eq!(body["details"]["field"], "id");
    }

    let (_, body) = send(&app, Method::GET, "/api/products", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    let mut payload = product_json("Hazel Nuts", 120);
    payload["id"] = json!("hazel");
    let (status, body) =
        send(&app, Method::POST, "/api/products", Some(&owner), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["product"]["id"], "hazel");

    let (status, _) = send(&app, Method::DELETE, "/api/products/hazel", Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_product_price_is_capped() {
    let app = test_app().await;
    let owner = owner_token(&app).await;

    let huge = product_json("Saffron", 4_611_686_018_427_387_904);
    let (status, body) = send(&app, Method::POST, "/api/products", Some(&owner), Some(huge)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6002);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(&owner),
        Some(product_json("Saffron", 900)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/products/saffron",
        Some(&owner),
        Some(json!({ "price": i64::MAX })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "price");
}

#[tokio::test]
async fn test_products_listed_newest_first() {
    let app = test_app().await;
    let owner = owner_token(&app).await;

    for name in ["Badam", "Pista", "Akhrot"] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/products",
            Some(&owner),
            Some(product_json(name, 100)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send(&app, Method::GET, "/api/products", None, None).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["akhrot", "pista", "badam"]);
}

// ========== Orders ==========

#[tokio::test]
async fn test_order_create_is_public() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        None,
        Some(order_json(&[("batham", 140, 2)])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Order placed successfully");
    assert_eq!(body["order"]["status"], "pending");
    assert_eq!(body["order"]["subtotal"], 280);
    assert_eq!(body["order"]["total"], 330);
    assert_eq!(body["order"]["source"], "AS Nuts Website");
    assert_eq!(body["order"]["items"][0]["quantity"], 2);
}

#[tokio::test]
async fn test_order_create_validation() {
    let app = test_app().await;

    let empty = order_json(&[]);
    let (status, body) = send(&app, Method::POST, "/api/orders", None, Some(empty)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4002);

    let mut wrong_total = order_json(&[("w180", 160, 1)]);
    wrong_total["total"] = json!(100);
    let (status, body) = send(&app, Method::POST, "/api/orders", None, Some(wrong_total)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4003);

    let mut wrong_line = order_json(&[("w180", 160, 2)]);
    wrong_line["items"][0]["lineTotal"] = json!(999);
    let (status, body) = send(&app, Method::POST, "/api/orders", None, Some(wrong_line)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4004);

    let mut no_phone = order_json(&[("w180", 160, 1)]);
    no_phone["phone"] = json!("  ");
    let (status, body) = send(&app, Method::POST, "/api/orders", None, Some(no_phone)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "phone");
}

#[tokio::test]
async fn test_order_with_overflowing_amounts_rejected() {
    let app = test_app().await;
    let owner = owner_token(&app).await;

    // 2^62 * 4 在 i64 中回绕为 0
    let mut wrapped = order_json(&[("w180", 160, 1)]);
    wrapped["items"][0]["unitPrice"] = json!(4_611_686_018_427_387_904_i64);
    wrapped["items"][0]["quantity"] = json!(4);
    wrapped["items"][0]["lineTotal"] = json!(0);
    wrapped["subtotal"] = json!(0);
    wrapped["total"] = json!(50);
    let (status, body) = send(&app, Method::POST, "/api/orders", None, Some(wrapped)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4004);

    let mut doubled = order_json(&[("w180", 160, 1)]);
    doubled["items"][0]["unitPrice"] = json!(i64::MAX / 2 + 1);
    doubled["items"][0]["quantity"] = json!(2);
    let (status, body) = send(&app, Method::POST, "/api/orders", None, Some(doubled)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4004);

    let (status, body) = send(&app, Method::GET, "/api/orders", Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_order_list_owner_only_newest_first() {
    let app = test_app().await;
    let owner = owner_token(&app).await;
    let customer = customer_token(&app).await;

    let mut ids = Vec::new();
    for qty in 1..=3 {
        let (_, body) = send(
            &app,
            Method::POST,
            "/api/orders",
            None,
            Some(order_json(&[("dates", 80, qty)])),
        )
        .await;
        ids.push(body["order"]["id"].as_i64().unwrap());
        tokio::time::sleep(std::time::Duration::from_millis(3)).await;
    }

    let (status, _) = send(&app, Method::GET, "/api/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, Method::GET, "/api/orders", Some(&customer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Only owners can view orders");

    let (status, body) = send(&app, Method::GET, "/api/orders", Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_i64().unwrap())
        .collect();
    ids.reverse();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn test_order_status_transitions() {
    let app = test_app().await;
    let owner = owner_token(&app).await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/orders",
        None,
        Some(order_json(&[("pista", 160, 1), ("chia", 90, 2)])),
    )
    .await;
    let order = created["order"].clone();
    let id = order["id"].as_i64().unwrap();
    let uri = format!("/api/orders/{id}/status");

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&owner),
        Some(json!({ "status": "completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order marked as completed");

    // 只有状态字段变化
    let mut expected = order.clone();
    expected["status"] = json!("completed");
    assert_eq!(body["order"], expected);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&owner),
        Some(json!({ "status": "pending" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4005);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/orders/12345/status",
        Some(&owner),
        Some(json!({ "status": "cancelled" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_order_status_update_requires_owner() {
    let app = test_app().await;
    let customer = customer_token(&app).await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/orders",
        None,
        Some(order_json(&[("kaju", 130, 1)])),
    )
    .await;
    let id = created["order"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/orders/{id}/status"),
        Some(&customer),
        Some(json!({ "status": "cancelled" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Only owners can update orders");
}
