use uuid::Uuid;

use super::{failed, failed_or_missing};
use crate::error::AppError;
use crate::models::{User, UserWithBlogs};
use crate::store::{NewUser, Store, UserChanges};

pub struct UserService;

impl UserService {
    /// Duplicate usernames surface as a client error.
    pub async fn create(store: &dyn Store, input: NewUser) -> Result<User, AppError> {
        store
            .create_user(input)
            .await
            .map_err(failed("Failed to create user."))
    }

    pub async fn list(store: &dyn Store) -> Result<Vec<User>, AppError> {
        store.list_users().await.map_err(failed("Failed to fetch users."))
    }

    pub async fn get(store: &dyn Store, id: Uuid) -> Result<Option<UserWithBlogs>, AppError> {
        store.user_by_id(id).await.map_err(failed("Failed to fetch user."))
    }

    pub async fn get_by_name(
        store: &dyn Store,
        username: &str,
    ) -> Result<Option<UserWithBlogs>, AppError> {
        store
            .user_by_name(username)
            .await
            .map_err(failed("Failed to fetch user."))
    }

    pub async fn update(store: &dyn Store, id: Uuid, changes: UserChanges) -> Result<User, AppError> {
        store
            .update_user(id, changes)
            .await
            .map_err(failed_or_missing("Failed to update user.", format!("user {}", id)))
    }

    /// Removes the user together with their blogs and every related comment.
    pub async fn remove(store: &dyn Store, id: Uuid) -> Result<User, AppError> {
        let user = store
            .delete_user(id)
            .await
            .map_err(failed_or_missing("Failed to delete user.", format!("user {}", id)))?;
        tracing::info!(user_id = %id, "user removed");
        Ok(user)
    }
}
