#![allow(dead_code)]

use asnuts_server::api::build_app;
use asnuts_server::{Config, ServerState};
use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const OWNER_EMAIL: &str = "owner@asnuts.com";
pub const OWNER_PASSWORD: &str = "ASNuts2024!";

pub async fn test_app() -> Router {
    test_app_with(Config::for_tests(OWNER_EMAIL)).await
}

pub async fn test_app_with(config: Config) -> Router {
    let state = ServerState::in_memory(config)
        .await
        .expect("in-memory state");
    build_app(state)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Register and return the issued token
pub async fn register(app: &Router, name: &str, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({ "name": name, "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

pub async fn owner_token(app: &Router) -> String {
    register(app, "AS Nuts Owner", OWNER_EMAIL, OWNER_PASSWORD).await
}

pub async fn customer_token(app: &Router) -> String {
    register(app, "Priya", "priya@example.com", "cashew123").await
}

pub fn product_json(name: &str, price: i64) -> Value {
    json!({
        "name": name,
        "nameTamil": "முந்திரி",
        "price": price,
        "description": format!("{name} from Panruti"),
        "image": "https://example.com/cashew.jpg",
        "category": "cashews",
        "badge": "Premium"
    })
}

pub fn order_json(items: &[(&str, i64, u32)]) -> Value {
    let lines: Vec<Value> = items
        .iter()
        .map(|(id, price, qty)| {
            json!({
                "productId": id,
                "name": format!("{id} name"),
                "unitPrice": price,
                "quantity": qty,
                "lineTotal": price * i64::from(*qty)
            })
        })
        .collect();
    let subtotal: i64 = items.iter().map(|(_, p, q)| p * i64::from(*q)).sum();
    json!({
        "customerName": "Priya",
        "phone": "9876543210",
        "address": "12 Gandhi Road",
        "pincode": "607106",
        "place": "Panruti",
        "paymentMethod": "cod",
        "items": lines,
        "subtotal": subtotal,
        "shipping": 50,
        "total": subtotal + 50,
        "status": "pending"
    })
}
