use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::AppJson;
use crate::models::Comment;
use crate::response::{success_created, success_one, Data};
use crate::service::CommentService;
use crate::state::AppState;
use crate::validation::{parse_id, CreateCommentRequest, UpdateCommentRequest};

/// Post a comment on a blog.
#[utoipa::path(
    post,
    path = "/api/comment",
    tag = "comment",
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Created comment", body = Data<Comment>),
        (status = 400, description = "Invalid payload, unknown user or blog", body = ErrorBody),
    ),
)]
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = body.validate()?;
    let comment = CommentService::create(state.store.as_ref(), input).await?;
    Ok(success_created(comment))
}

/// List every comment, newest first.
#[utoipa::path(
    get,
    path = "/api/comment",
    tag = "comment",
    responses((status = 200, description = "All comments", body = Data<Vec<Comment>>)),
)]
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let comments = CommentService::list(state.store.as_ref()).await?;
    Ok(success_one(comments))
}

/// List the comments of one blog, newest first.
#[utoipa::path(
    get,
    path = "/api/comment/blog/{blogId}",
    tag = "comment",
    params(("blogId" = String, Path, description = "Blog id")),
    responses(
        (status = 200, description = "Comments of the blog", body = Data<Vec<Comment>>),
        (status = 400, description = "Malformed id", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_by_blog(
    State(state): State<AppState>,
    Path(blog_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let blog_id = parse_id("blogId", &blog_id)?;
    let comments = CommentService::list_by_blog(state.store.as_ref(), blog_id).await?;
    Ok(success_one(comments))
}

/// Fetch one comment; `data` is null when absent.
#[utoipa::path(
    get,
    path = "/api/comment/{id}",
    tag = "comment",
    params(("id" = String, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment or null", body = Data<Comment>),
        (status = 400, description = "Malformed id", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id("id", &id)?;
    let comment = CommentService::get(state.store.as_ref(), id).await?;
    Ok(success_one(comment))
}

/// Edit a comment's content.
#[utoipa::path(
    patch,
    path = "/api/comment/{id}",
    tag = "comment",
    params(("id" = String, Path, description = "Comment id")),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Updated comment", body = Data<Comment>),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 404, description = "Comment not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(body): AppJson<UpdateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id("id", &id)?;
    let changes = body.validate()?;
    let comment = CommentService::update(state.store.as_ref(), id, changes).await?;
    Ok(success_one(comment))
}

#[utoipa::path(
    delete,
    path = "/api/comment/{id}",
    tag = "comment",
    params(("id" = String, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Deleted comment", body = Data<Comment>),
        (status = 404, description = "Comment not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id("id", &id)?;
    let comment = CommentService::remove(state.store.as_ref(), id).await?;
    Ok(success_one(comment))
}
