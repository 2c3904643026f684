//! OpenAPI document for the `/api` surface, served as JSON under `/apitest`.

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::handlers::{blogs, comments, users};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog API",
        version = "1.0",
        description = "API documentation for the Blog application"
    ),
    paths(
        blogs::create,
        blogs::list,
        blogs::list_by_user,
        blogs::read,
        blogs::update,
        blogs::delete,
        comments::create,
        comments::list,
        comments::list_by_blog,
        comments::read,
        comments::update,
        comments::delete,
        users::create,
        users::list,
        users::read,
        users::read_by_username,
        users::update,
        users::delete,
    ),
    tags(
        (name = "blog", description = "Blog posts"),
        (name = "comment", description = "Comments on blog posts"),
        (name = "user", description = "User accounts"),
    ),
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn docs_routes() -> Router<AppState> {
    Router::new().route("/apitest/openapi.json", get(openapi_json))
}
