use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::AppJson;
use crate::models::{User, UserWithBlogs};
use crate::response::{success_created, success_one, Data};
use crate::service::UserService;
use crate::state::AppState;
use crate::validation::{parse_id, CreateUserRequest, UpdateUserRequest};

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/user",
    tag = "user",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Created user", body = Data<User>),
        (status = 400, description = "Invalid payload or username taken", body = ErrorBody),
    ),
)]
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = body.validate()?;
    let user = UserService::create(state.store.as_ref(), input).await?;
    Ok(success_created(user))
}

#[utoipa::path(
    get,
    path = "/api/user",
    tag = "user",
    responses((status = 200, description = "All users", body = Data<Vec<User>>)),
)]
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = UserService::list(state.store.as_ref()).await?;
    Ok(success_one(users))
}

/// Fetch a user with their blogs; `data` is null when absent.
#[utoipa::path(
    get,
    path = "/api/user/{id}",
    tag = "user",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User or null", body = Data<UserWithBlogs>),
        (status = 400, description = "Malformed id", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id("id", &id)?;
    let user = UserService::get(state.store.as_ref(), id).await?;
    Ok(success_one(user))
}

/// Profile lookup by username.
#[utoipa::path(
    get,
    path = "/api/user/username/{username}",
    tag = "user",
    params(("username" = String, Path, description = "Username")),
    responses((status = 200, description = "User or null", body = Data<UserWithBlogs>)),
)]
#[instrument(skip(state))]
pub async fn read_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::get_by_name(state.store.as_ref(), &username).await?;
    Ok(success_one(user))
}

#[utoipa::path(
    patch,
    path = "/api/user/{id}",
    tag = "user",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = Data<User>),
        (status = 400, description = "Invalid payload or username taken", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(body): AppJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id("id", &id)?;
    let changes = body.validate()?;
    let user = UserService::update(state.store.as_ref(), id, changes).await?;
    Ok(success_one(user))
}

/// Delete a user, their blogs and every related comment.
#[utoipa::path(
    delete,
    path = "/api/user/{id}",
    tag = "user",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted user", body = Data<User>),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id("id", &id)?;
    let user = UserService::remove(state.store.as_ref(), id).await?;
    Ok(success_one(user))
}
