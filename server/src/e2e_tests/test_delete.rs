//! Test deleting sales.

use axum::http::StatusCode;
use serde_json::Value;

use crate::e2e_tests::helpers::*;

#[tokio::test]
async fn test_delete_root_with_two_children() {
    let app = TestApp::new();
    app.create_all(&["M100AAA", "B200BBB", "Z300CCC"]).await;

    let (status, body) = app.delete("/api/car-sales/M100AAA").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = app.get("/api/car-sales/M100AAA").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, pre_order) = app.get("/api/car-sales/traversal/preorder").await;
    assert_eq!(plates(&pre_order), vec!["Z300CCC", "B200BBB"]);

    let persisted: Vec<String> = app
        .snapshot
        .sales()
        .into_iter()
        .map(|sale| sale.license_plate)
        .collect();
    assert_eq!(persisted, vec!["B200BBB", "Z300CCC"]);
}

#[tokio::test]
async fn test_delete_missing_returns_not_found() {
    let app = TestApp::new();
    app.create("M100AAA").await;

    let (status, body) = app.delete("/api/car-sales/Q999QQQ").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(detail(&body), "Car sale not found");
    // The snapshot is rewritten even when nothing was removed.
    assert_eq!(app.snapshot.save_count(), 2);
}

#[tokio::test]
async fn test_delete_last_sale_empties_snapshot() {
    let app = TestApp::new();
    app.create("M100AAA").await;

    let (status, _) = app.delete("/api/car-sales/M100AAA").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(app.snapshot.sales().is_empty());

    let (_, stats) = app.get("/api/car-sales/stats").await;
    assert_eq!(stats["total_nodes"], 0);
}
