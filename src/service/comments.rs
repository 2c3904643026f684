use uuid::Uuid;

use super::{failed, failed_or_missing};
use crate::error::AppError;
use crate::models::Comment;
use crate::store::{CommentChanges, NewComment, Store};

pub struct CommentService;

impl CommentService {
    pub async fn create(store: &dyn Store, input: NewComment) -> Result<Comment, AppError> {
        store
            .create_comment(input)
            .await
            .map_err(failed("Failed to create comment"))
    }

    pub async fn list(store: &dyn Store) -> Result<Vec<Comment>, AppError> {
        store
            .list_comments(None)
            .await
            .map_err(failed("Failed to fetch comments"))
    }

    pub async fn list_by_blog(store: &dyn Store, blog_id: Uuid) -> Result<Vec<Comment>, AppError> {
        store
            .list_comments(Some(blog_id))
            .await
            .map_err(failed("Failed to fetch comments for the specified blog"))
    }

    pub async fn get(store: &dyn Store, id: Uuid) -> Result<Option<Comment>, AppError> {
        store
            .comment_by_id(id)
            .await
            .map_err(failed("Failed to fetch comment"))
    }

    pub async fn update(
        store: &dyn Store,
        id: Uuid,
        changes: CommentChanges,
    ) -> Result<Comment, AppError> {
        store
            .update_comment(id, changes)
            .await
            .map_err(failed_or_missing("Failed to update comment", format!("comment {}", id)))
    }

    pub async fn remove(store: &dyn Store, id: Uuid) -> Result<Comment, AppError> {
        store
            .delete_comment(id)
            .await
            .map_err(failed_or_missing("Failed to delete comment", format!("comment {}", id)))
    }
}
