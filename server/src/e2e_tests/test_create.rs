//! Test creating sales through the API.

use axum::http::StatusCode;
use serde_json::json;

use crate::e2e_tests::helpers::*;

#[tokio::test]
async fn test_welcome() {
    let app = TestApp::new();
    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the Car Sales Binary Tree API");
}

#[tokio::test]
async fn test_create_returns_stored_sale() {
    let app = TestApp::new();

    let first = app.create("M100AAA").await;
    assert_eq!(first["id"], 1);
    assert_eq!(first["license_plate"], "M100AAA");
    assert_eq!(first["color"], "red");
    assert_eq!(first["price"], 15000.0);

    let second = app.create("B200BBB").await;
    assert_eq!(second["id"], 2);
    assert_eq!(app.snapshot.save_count(), 2);
}

#[tokio::test]
async fn test_create_defaults_sale_date() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/api/car-sales",
            json!({"license_plate": "XYZ789", "brand": "Honda", "color": "blue", "price": 20000.5}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["sale_date"].is_string());
}

#[tokio::test]
async fn test_create_existing_plate_overwrites() {
    let app = TestApp::new();
    app.create("M100AAA").await;

    let mut body = sale_body("M100AAA");
    body["brand"] = json!("Subaru");
    let (status, overwritten) = app.post("/api/car-sales", body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(overwritten["id"], 1);
    assert_eq!(overwritten["brand"], "Subaru");

    let (_, stats) = app.get("/api/car-sales/stats").await;
    assert_eq!(stats["total_nodes"], 1);
}

#[tokio::test]
async fn test_create_rejects_invalid_fields() {
    let app = TestApp::new();

    for (field, value) in [
        ("license_plate", json!("AB1")),
        ("license_plate", json!("ABCDEFGHIJK")),
        ("brand", json!("X")),
        ("price", json!(0)),
        ("price", json!(-5.0)),
    ] {
        let mut body = sale_body("M100AAA");
        body[field] = value;
        let (status, response) = app.post("/api/car-sales", body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{field}: {response}");
        assert!(!detail(&response).is_empty());
    }

    assert_eq!(app.snapshot.save_count(), 0);
}

#[tokio::test]
async fn test_create_rejects_malformed_body() {
    let app = TestApp::new();

    let mut body = sale_body("M100AAA");
    body["color"] = json!("purple");
    let (status, response) = app.post("/api/car-sales", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response["detail"].is_string());

    let (status, _) = app
        .post("/api/car-sales", json!({"license_plate": "M100AAA"}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
