use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::{AppJson, AppQuery};
use crate::models::{Blog, BlogDetail, BlogSummary};
use crate::response::{success_created, success_one, success_page, Data, Page};
use crate::service::BlogService;
use crate::state::AppState;
use crate::validation::{parse_id, BlogListQuery, CreateBlogRequest, UpdateBlogRequest};

/// Create a blog post.
#[utoipa::path(
    post,
    path = "/api/blog",
    tag = "blog",
    request_body = CreateBlogRequest,
    responses(
        (status = 201, description = "Created blog", body = Data<Blog>),
        (status = 400, description = "Invalid payload or unknown user", body = ErrorBody),
    ),
)]
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateBlogRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = body.validate()?;
    let blog = BlogService::create(state.store.as_ref(), input).await?;
    Ok(success_created(blog))
}

/// List blogs, newest first, optionally filtered by tag.
#[utoipa::path(
    get,
    path = "/api/blog",
    tag = "blog",
    params(BlogListQuery),
    responses(
        (status = 200, description = "One page of blogs", body = Page<BlogSummary>),
        (status = 400, description = "Invalid tag, page or limit", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<BlogListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (filter, page) = query.validate()?;
    let page = BlogService::list(state.store.as_ref(), filter, page).await?;
    Ok(success_page(page))
}

/// List one user's blogs, newest first, optionally filtered by tag.
#[utoipa::path(
    get,
    path = "/api/blog/{userId}/user",
    tag = "blog",
    params(("userId" = String, Path, description = "Owner id"), BlogListQuery),
    responses(
        (status = 200, description = "One page of the user's blogs", body = Page<BlogSummary>),
        (status = 400, description = "Invalid id, tag, page or limit", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    AppQuery(query): AppQuery<BlogListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = parse_id("userId", &user_id)?;
    let (filter, page) = query.validate()?;
    let page = BlogService::list_by_user(state.store.as_ref(), user_id, filter, page).await?;
    Ok(success_page(page))
}

/// Fetch one blog with its author and comments; `data` is null when absent.
#[utoipa::path(
    get,
    path = "/api/blog/{id}",
    tag = "blog",
    params(("id" = String, Path, description = "Blog id")),
    responses(
        (status = 200, description = "Blog detail or null", body = Data<BlogDetail>),
        (status = 400, description = "Malformed id", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id("id", &id)?;
    let blog = BlogService::get(state.store.as_ref(), id).await?;
    Ok(success_one(blog))
}

/// Partially update a blog.
#[utoipa::path(
    patch,
    path = "/api/blog/{id}",
    tag = "blog",
    params(("id" = String, Path, description = "Blog id")),
    request_body = UpdateBlogRequest,
    responses(
        (status = 200, description = "Updated blog", body = Data<Blog>),
        (status = 400, description = "Invalid payload or constraint violation", body = ErrorBody),
        (status = 404, description = "Blog not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(body): AppJson<UpdateBlogRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id("id", &id)?;
    let changes = body.validate()?;
    let blog = BlogService::update(state.store.as_ref(), id, changes).await?;
    Ok(success_one(blog))
}

/// Delete a blog and its comments.
#[utoipa::path(
    delete,
    path = "/api/blog/{id}",
    tag = "blog",
    params(("id" = String, Path, description = "Blog id")),
    responses(
        (status = 200, description = "Deleted blog", body = Data<Blog>),
        (status = 404, description = "Blog not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id("id", &id)?;
    let blog = BlogService::remove(state.store.as_ref(), id).await?;
    Ok(success_one(blog))
}
