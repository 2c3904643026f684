//! Operational routes and the API document.

mod common;

use axum::http::StatusCode;
use common::{get, test_app};

#[tokio::test]
async fn health_ready_and_version() {
    let app = test_app();

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    let (_, body) = get(&app, "/version").await;
    assert_eq!(body["name"], "blog-api");
}

#[tokio::test]
async fn openapi_document_lists_every_resource_route() {
    let app = test_app();
    let (status, doc) = get(&app, "/apitest/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    let paths = doc["paths"].as_object().unwrap();
    for path in [
        "/api/blog",
        "/api/blog/{userId}/user",
        "/api/blog/{id}",
        "/api/comment",
        "/api/comment/blog/{blogId}",
        "/api/comment/{id}",
        "/api/user",
        "/api/user/{id}",
        "/api/user/username/{username}",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
}
