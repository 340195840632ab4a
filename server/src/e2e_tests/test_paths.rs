//! Test the path and longest-path queries.

use axum::http::StatusCode;
use serde_json::json;

use crate::e2e_tests::helpers::*;

/// ```text
///         M100AAA
///        /       \
///    B200BBB   Z300CCC
///    /     \
/// A100AAA C100CCC
///              \
///            D100DDD
/// ```
async fn six_sale_app() -> TestApp {
    let app = TestApp::new();
    app.create_all(&[
        "M100AAA", "B200BBB", "Z300CCC", "A100AAA", "C100CCC", "D100DDD",
    ])
    .await;
    app
}

#[tokio::test]
async fn test_path_through_root() {
    let app = TestApp::new();
    app.create_all(&["M100AAA", "B200BBB", "Z300CCC"]).await;

    let (status, body) = app.get("/api/car-sales/path/B200BBB/Z300CCC").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plates(&body), ["B200BBB", "M100AAA", "Z300CCC"]);
}

#[tokio::test]
async fn test_path_within_subtree_and_reversed() {
    let app = six_sale_app().await;

    let (_, body) = app.get("/api/car-sales/path/A100AAA/D100DDD").await;
    assert_eq!(plates(&body), ["A100AAA", "B200BBB", "C100CCC", "D100DDD"]);

    let (_, body) = app.get("/api/car-sales/path/D100DDD/A100AAA").await;
    assert_eq!(plates(&body), ["D100DDD", "C100CCC", "B200BBB", "A100AAA"]);

    let (_, body) = app.get("/api/car-sales/path/D100DDD/Z300CCC").await;
    assert_eq!(
        plates(&body),
        ["D100DDD", "C100CCC", "B200BBB", "M100AAA", "Z300CCC"]
    );

    let (_, body) = app.get("/api/car-sales/path/C100CCC/C100CCC").await;
    assert_eq!(plates(&body), ["C100CCC"]);
}

#[tokio::test]
async fn test_path_missing_endpoint() {
    let app = six_sale_app().await;

    let (status, body) = app.get("/api/car-sales/path/A100AAA/Q999QQQ").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(detail(&body), "One or both nodes not found");

    let (status, _) = app.get("/api/car-sales/path/A1/D100DDD").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_longest_path() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/car-sales/longest-path").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    app.create("M100AAA").await;
    let (_, body) = app.get("/api/car-sales/longest-path").await;
    assert_eq!(plates(&body), ["M100AAA"]);

    let app = six_sale_app().await;
    let (_, body) = app.get("/api/car-sales/longest-path").await;
    assert_eq!(
        plates(&body),
        ["D100DDD", "C100CCC", "B200BBB", "M100AAA", "Z300CCC"]
    );
}
