//! Test traversals and tree statistics.

use axum::http::StatusCode;
use serde_json::json;

use crate::e2e_tests::helpers::*;

#[tokio::test]
async fn test_traversal_orders() {
    let app = TestApp::new();
    app.create_all(&["M100AAA", "B200BBB", "Z300CCC"]).await;

    for (order, expected) in [
        ("inorder", ["B200BBB", "M100AAA", "Z300CCC"]),
        ("preorder", ["M100AAA", "B200BBB", "Z300CCC"]),
        ("postorder", ["B200BBB", "Z300CCC", "M100AAA"]),
    ] {
        let (status, body) = app.get(&format!("/api/car-sales/traversal/{order}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(plates(&body), expected, "{order}");
    }
}

#[tokio::test]
async fn test_traversal_rejects_unknown_order() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/car-sales/traversal/levelorder").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail(&body), "Invalid traversal order");
}

#[tokio::test]
async fn test_traversal_of_empty_tree() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/car-sales/traversal/inorder").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_stats() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/car-sales/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"height": 0, "total_nodes": 0, "leaf_count": 0, "nodes_per_level": {}})
    );

    app.create_all(&["M100AAA", "B200BBB", "Z300CCC"]).await;
    let (_, body) = app.get("/api/car-sales/stats").await;
    assert_eq!(
        body,
        json!({
            "height": 2,
            "total_nodes": 3,
            "leaf_count": 2,
            "nodes_per_level": {"0": 1, "1": 2},
        })
    );

    app.create_all(&["A100AAA", "C100CCC", "D100DDD"]).await;
    let (_, body) = app.get("/api/car-sales/stats").await;
    assert_eq!(
        body,
        json!({
            "height": 4,
            "total_nodes": 6,
            "leaf_count": 3,
            "nodes_per_level": {"0": 1, "1": 2, "2": 2, "3": 1},
        })
    );
}
