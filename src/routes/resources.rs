//! `/blog`, `/comment` and `/user` resource routes.
//!
//! Dynamic segments at the same position share one name (`:id`) because the router does
//! not allow two names there; `/blog/:id/user` therefore lists the blogs of user `:id`.

use crate::handlers::{blogs, comments, users};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(blogs::list).post(blogs::create))
        .route("/:id/user", get(blogs::list_by_user))
        .route(
            "/:id",
            get(blogs::read).patch(blogs::update).delete(blogs::delete),
        )
}

pub fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(comments::list).post(comments::create))
        .route("/blog/:id", get(comments::list_by_blog))
        .route(
            "/:id",
            get(comments::read)
                .patch(comments::update)
                .delete(comments::delete),
        )
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route("/username/:id", get(users::read_by_username))
        .route(
            "/:id",
            get(users::read).patch(users::update).delete(users::delete),
        )
}
