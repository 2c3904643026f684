//! Persistence gateway: the `Store` trait the resources talk to, and its implementations.

pub mod memory;
mod postgres;
mod schema;

pub use postgres::PgStore;
pub use schema::{ensure_database_exists, ensure_schema};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Blog, BlogDetail, BlogSummary, Comment, Tag, User, UserWithBlogs};

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
}

#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub content: String,
    pub community: Tag,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct BlogChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub community: Option<Tag>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub user_id: Uuid,
    pub blog_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct CommentChanges {
    pub content: Option<String>,
}

/// Equality filters for blog listings; `None` means unfiltered.
#[derive(Debug, Clone, Default)]
pub struct BlogFilter {
    pub tag: Option<Tag>,
    pub user_id: Option<Uuid>,
}

impl BlogFilter {
    pub fn matches(&self, blog: &Blog) -> bool {
        self.tag.map_or(true, |t| blog.community == t)
            && self.user_id.map_or(true, |u| blog.user_id == u)
    }
}

/// 1-based page and page size, already bounded by validation.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// One page of a listing plus the unpaginated match count.
#[derive(Debug, Clone)]
pub struct Paged<T> {
    pub total: i64,
    pub rows: Vec<T>,
}

/// Data access used by the resource services.
///
/// Updates and deletes report [`StoreError::NotFound`] when the target row is absent;
/// reads return `None`. Constraint failures surface as [`StoreError::Constraint`].
/// Cascading deletes are atomic.
#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn create_user(&self, input: NewUser) -> Result<User, StoreError>;
    /// All users, `id` descending.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
    async fn user_by_id(&self, id: Uuid) -> Result<Option<UserWithBlogs>, StoreError>;
    async fn user_by_name(&self, username: &str) -> Result<Option<UserWithBlogs>, StoreError>;
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<User, StoreError>;
    /// Deletes the user's comments, comments on the user's blogs, the blogs, then the user.
    async fn delete_user(&self, id: Uuid) -> Result<User, StoreError>;

    async fn create_blog(&self, input: NewBlog) -> Result<Blog, StoreError>;
    /// Newest first.
    async fn list_blogs(
        &self,
        filter: &BlogFilter,
        page: PageRequest,
    ) -> Result<Paged<BlogSummary>, StoreError>;
    async fn blog_by_id(&self, id: Uuid) -> Result<Option<BlogDetail>, StoreError>;
    async fn update_blog(&self, id: Uuid, changes: BlogChanges) -> Result<Blog, StoreError>;
    /// Deletes the blog's comments, then the blog.
    async fn delete_blog(&self, id: Uuid) -> Result<Blog, StoreError>;

    async fn create_comment(&self, input: NewComment) -> Result<Comment, StoreError>;
    /// Newest first, optionally restricted to one blog.
    async fn list_comments(&self, blog_id: Option<Uuid>) -> Result<Vec<Comment>, StoreError>;
    async fn comment_by_id(&self, id: Uuid) -> Result<Option<Comment>, StoreError>;
    async fn update_comment(&self, id: Uuid, changes: CommentChanges) -> Result<Comment, StoreError>;
    async fn delete_comment(&self, id: Uuid) -> Result<Comment, StoreError>;
}
