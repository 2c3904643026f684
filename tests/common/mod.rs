//! Shared helpers: an application over the in-memory store and a JSON request driver.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use blog_api::store::memory::MemoryStore;
use blog_api::{app, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub fn test_app() -> Router {
    app(AppState::new(Arc::new(MemoryStore::new())))
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

pub async fn create_user(app: &Router, username: &str) -> String {
    let (status, body) = send(app, "POST", "/api/user", Some(serde_json::json!({ "username": username }))).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

pub async fn create_blog(app: &Router, user_id: &str, title: &str, tag: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/blog",
        Some(serde_json::json!({
            "title": title,
            "content": format!("content of {}", title),
            "community": tag,
            "userId": user_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

pub async fn create_comment(app: &Router, user_id: &str, blog_id: &str, content: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/comment",
        Some(serde_json::json!({
            "content": content,
            "userId": user_id,
            "blogId": blog_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}
