//! Test looking up and updating sales.

use axum::http::StatusCode;
use serde_json::json;

use crate::e2e_tests::helpers::*;

#[tokio::test]
async fn test_get_existing_and_missing() {
    let app = TestApp::new();
    app.create_all(&["M100AAA", "B200BBB"]).await;

    let (status, body) = app.get("/api/car-sales/B200BBB").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);

    let (status, body) = app.get("/api/car-sales/Q999QQQ").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(detail(&body), "Car sale not found");
}

#[tokio::test]
async fn test_get_rejects_bad_plate_length() {
    let app = TestApp::new();
    let (status, _) = app.get("/api/car-sales/AB1").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_changes_only_given_fields() {
    let app = TestApp::new();
    app.create("M100AAA").await;

    let (status, body) = app
        .put("/api/car-sales/M100AAA", json!({"color": "green", "price": 31000.0}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["color"], "green");
    assert_eq!(body["price"], 31000.0);
    assert_eq!(body["brand"], "Toyota");

    let (_, stored) = app.get("/api/car-sales/M100AAA").await;
    assert_eq!(stored, body);
    assert_eq!(app.snapshot.save_count(), 2);
}

#[tokio::test]
async fn test_update_missing_and_invalid() {
    let app = TestApp::new();
    app.create("M100AAA").await;

    let (status, body) = app
        .put("/api/car-sales/Q999QQQ", json!({"brand": "Mazda"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(detail(&body), "Car sale not found");

    let (status, _) = app
        .put("/api/car-sales/M100AAA", json!({"price": -1.0}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(app.snapshot.save_count(), 1);
}
