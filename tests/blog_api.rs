//! Blog resource through the HTTP surface.

mod common;

use axum::http::StatusCode;
use common::{create_blog, create_comment, create_user, get, send, test_app};
use serde_json::json;

#[tokio::test]
async fn created_blog_is_returned_with_author_and_no_comments() {
    let app = test_app();
    let john = create_user(&app, "john_doe").await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/blog",
        Some(json!({
            "title": "First Blog Post",
            "content": "This is the content of the first blog post.",
            "community": "OTHERS",
            "userId": john,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_str().unwrap();

    let (status, body) = get(&app, &format!("/api/blog/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    let blog = &body["data"];
    assert_eq!(blog["title"], "First Blog Post");
    assert_eq!(blog["content"], "This is the content of the first blog post.");
    assert_eq!(blog["community"], "OTHERS");
    assert_eq!(blog["userId"], john.as_str());
    assert_eq!(blog["user"]["username"], "john_doe");
    assert_eq!(blog["comments"], json!([]));
    assert_eq!(blog["_count"]["comments"], 0);
}

#[tokio::test]
async fn empty_title_or_content_is_rejected_and_nothing_is_stored() {
    let app = test_app();
    let user = create_user(&app, "writer").await;

    for payload in [
        json!({ "title": "", "content": "body", "community": "FOOD", "userId": user }),
        json!({ "title": "title", "content": "", "community": "FOOD", "userId": user }),
        json!({ "content": "body", "community": "FOOD", "userId": user }),
    ] {
        let (status, body) = send(&app, "POST", "/api/blog", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "validation_error");
    }

    let (_, list) = get(&app, "/api/blog").await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn unknown_author_or_tag_is_a_client_error() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/blog",
        Some(json!({
            "title": "t",
            "content": "c",
            "community": "HISTORY",
            "userId": uuid::Uuid::new_v4(),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
    assert_eq!(body["error"]["message"], "Failed to create blog");

    let user = create_user(&app, "writer").await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/blog",
        Some(json!({ "title": "t", "content": "c", "community": "GARDENING", "userId": user })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"][0]["field"], "community");
}

#[tokio::test]
async fn pages_cover_every_row_exactly_once_newest_first() {
    let app = test_app();
    let user = create_user(&app, "prolific").await;
    let mut created = Vec::new();
    for i in 0..25 {
        created.push(create_blog(&app, &user, &format!("post {}", i), "HISTORY").await);
    }

    let mut seen = Vec::new();
    for page in 1..=3 {
        let (status, body) = get(&app, &format!("/api/blog?page={}&limit=10", page)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 25);
        assert_eq!(body["page"], page);
        assert_eq!(body["limit"], 10);
        let rows = body["data"].as_array().unwrap();
        assert!(rows.len() <= 10);
        for row in rows {
            assert_eq!(row["user"]["username"], "prolific");
            seen.push(row["id"].as_str().unwrap().to_string());
        }
    }
    assert_eq!(seen.len(), 25);

    created.reverse();
    assert_eq!(seen, created);

    let (_, body) = get(&app, "/api/blog?page=4&limit=10").await;
    assert_eq!(body["total"], 25);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn default_page_and_limit_are_echoed() {
    let app = test_app();
    let (status, body) = get(&app, "/api/blog").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "total": 0, "page": 1, "limit": 10, "data": [] }));
}

#[tokio::test]
async fn tag_filter_returns_only_matching_rows() {
    let app = test_app();
    let user = create_user(&app, "cook").await;
    create_blog(&app, &user, "soup", "FOOD").await;
    create_blog(&app, &user, "bread", "FOOD").await;
    create_blog(&app, &user, "rome", "HISTORY").await;

    let (_, body) = get(&app, "/api/blog?tag=FOOD").await;
    assert_eq!(body["total"], 2);
    for row in body["data"].as_array().unwrap() {
        assert_eq!(row["community"], "FOOD");
    }

    let (_, body) = get(&app, "/api/blog?tag=FASHION").await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn out_of_range_paging_is_rejected() {
    let app = test_app();
    for uri in [
        "/api/blog?limit=0",
        "/api/blog?limit=101",
        "/api/blog?page=0",
        "/api/blog?page=abc",
        "/api/blog?tag=food",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"]["code"], "validation_error");
    }
}

#[tokio::test]
async fn user_listing_is_scoped_to_the_owner() {
    let app = test_app();
    let alice = create_user(&app, "alice").await;
    let bob = create_user(&app, "bob").await;
    create_blog(&app, &alice, "a1", "PETS").await;
    create_blog(&app, &alice, "a2", "FOOD").await;
    create_blog(&app, &bob, "b1", "PETS").await;

    let (status, body) = get(&app, &format!("/api/blog/{}/user", alice)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    for row in body["data"].as_array().unwrap() {
        assert_eq!(row["userId"], alice.as_str());
    }

    let (_, body) = get(&app, &format!("/api/blog/{}/user?tag=PETS", alice)).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["title"], "a1");
}

#[tokio::test]
async fn listing_counts_comments() {
    let app = test_app();
    let user = create_user(&app, "chatty").await;
    let blog = create_blog(&app, &user, "popular", "SPORTS").await;
    create_comment(&app, &user, &blog, "one").await;
    create_comment(&app, &user, &blog, "two").await;

    let (_, body) = get(&app, "/api/blog").await;
    assert_eq!(body["data"][0]["_count"]["comments"], 2);

    let (_, body) = get(&app, &format!("/api/blog/{}", blog)).await;
    let comments = body["data"]["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["content"], "two");
    assert_eq!(comments[0]["user"]["username"], "chatty");
}

#[tokio::test]
async fn missing_blog_reads_as_null_and_malformed_id_is_rejected() {
    let app = test_app();
    let (status, body) = get(&app, &format!("/api/blog/{}", uuid::Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": null }));

    let (status, _) = get(&app, "/api/blog/not-an-id").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_with_empty_title_leaves_row_unchanged() {
    let app = test_app();
    let user = create_user(&app, "editor").await;
    let blog = create_blog(&app, &user, "first draft", "HEALTH").await;
    let uri = format!("/api/blog/{}", blog);

    let (status, body) = send(&app, "PATCH", &uri, Some(json!({ "title": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");

    let (_, body) = get(&app, &uri).await;
    assert_eq!(body["data"]["title"], "first draft");

    let (status, body) = send(
        &app,
        "PATCH",
        &uri,
        Some(json!({ "title": "revised", "community": "TECHNOLOGY" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "revised");
    assert_eq!(body["data"]["content"], "content of first draft");
    assert_eq!(body["data"]["community"], "TECHNOLOGY");
}

#[tokio::test]
async fn update_or_delete_of_missing_blog_is_not_found() {
    let app = test_app();
    let uri = format!("/api/blog/{}", uuid::Uuid::new_v4());

    let (status, _) = send(&app, "PATCH", &uri, Some(json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn deleting_a_blog_removes_its_comments() {
    let app = test_app();
    let user = create_user(&app, "owner").await;
    let doomed = create_blog(&app, &user, "doomed", "OTHERS").await;
    let kept = create_blog(&app, &user, "kept", "OTHERS").await;
    create_comment(&app, &user, &doomed, "bye").await;
    create_comment(&app, &user, &doomed, "bye again").await;
    create_comment(&app, &user, &kept, "stay").await;

    let (status, body) = send(&app, "DELETE", &format!("/api/blog/{}", doomed), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "doomed");

    let (_, body) = get(&app, &format!("/api/comment/blog/{}", doomed)).await;
    assert_eq!(body["data"], json!([]));
    let (_, body) = get(&app, "/api/comment").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    let (_, body) = get(&app, &format!("/api/blog/{}", doomed)).await;
    assert_eq!(body["data"], json!(null));
}

#[tokio::test]
async fn malformed_json_body_uses_error_envelope() {
    let app = test_app();
    let (status, body) = send(&app, "POST", "/api/blog", Some(json!({ "title": 5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
}
