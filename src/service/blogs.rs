use uuid::Uuid;

use super::{failed, failed_or_missing};
use crate::error::AppError;
use crate::models::{Blog, BlogDetail, BlogSummary};
use crate::response::Page;
use crate::store::{BlogChanges, BlogFilter, NewBlog, PageRequest, Store};

pub struct BlogService;

impl BlogService {
    /// An unknown `user_id` violates the foreign key and is reported as a client error.
    pub async fn create(store: &dyn Store, input: NewBlog) -> Result<Blog, AppError> {
        store
            .create_blog(input)
            .await
            .map_err(failed("Failed to create blog"))
    }

    /// Newest first; `total` counts every match regardless of the page.
    pub async fn list(
        store: &dyn Store,
        filter: BlogFilter,
        page: PageRequest,
    ) -> Result<Page<BlogSummary>, AppError> {
        let paged = store
            .list_blogs(&filter, page)
            .await
            .map_err(failed("Failed to fetch blogs"))?;
        Ok(Page::new(paged, page))
    }

    pub async fn list_by_user(
        store: &dyn Store,
        user_id: Uuid,
        filter: BlogFilter,
        page: PageRequest,
    ) -> Result<Page<BlogSummary>, AppError> {
        let filter = BlogFilter {
            user_id: Some(user_id),
            ..filter
        };
        Self::list(store, filter, page).await
    }

    pub async fn get(store: &dyn Store, id: Uuid) -> Result<Option<BlogDetail>, AppError> {
        store
            .blog_by_id(id)
            .await
            .map_err(failed("Failed to find the blog"))
    }

    pub async fn update(store: &dyn Store, id: Uuid, changes: BlogChanges) -> Result<Blog, AppError> {
        store
            .update_blog(id, changes)
            .await
            .map_err(failed_or_missing("Failed to update blog", format!("blog {}", id)))
    }

    /// Removes the blog and its comments.
    pub async fn remove(store: &dyn Store, id: Uuid) -> Result<Blog, AppError> {
        let blog = store
            .delete_blog(id)
            .await
            .map_err(failed_or_missing("Failed to delete blog", format!("blog {}", id)))?;
        tracing::info!(blog_id = %id, "blog removed");
        Ok(blog)
    }
}
