//! In-process [`Store`] backing the router tests.
//!
//! Mirrors the PostgreSQL constraints the resources rely on: unique usernames and
//! foreign keys on blog and comment references.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    BlogChanges, BlogFilter, CommentChanges, NewBlog, NewComment, NewUser, PageRequest, Paged,
    Store, UserChanges,
};
use crate::error::StoreError;
use crate::models::{
    Blog, BlogCount, BlogDetail, BlogSummary, Comment, CommentWithUser, User, UserWithBlogs,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    blogs: HashMap<Uuid, Blog>,
    comments: HashMap<Uuid, Comment>,
    /// Last assigned `created_at`; kept strictly increasing so ordering is deterministic.
    last_created: Option<DateTime<Utc>>,
}

impl Tables {
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.last_created {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created = Some(ts);
        ts
    }

    fn username_taken(&self, username: &str, except: Option<Uuid>) -> bool {
        self.users
            .values()
            .any(|u| u.username == username && Some(u.id) != except)
    }

    fn require_user(&self, id: Uuid) -> Result<&User, StoreError> {
        self.users
            .get(&id)
            .ok_or_else(|| StoreError::Constraint(format!("user {} does not exist", id)))
    }

    fn comment_count(&self, blog_id: Uuid) -> i64 {
        self.comments.values().filter(|c| c.blog_id == blog_id).count() as i64
    }

    fn summary(&self, blog: &Blog) -> Option<BlogSummary> {
        let user = self.users.get(&blog.user_id)?.clone();
        Some(BlogSummary {
            blog: blog.clone(),
            user,
            count: BlogCount {
                comments: self.comment_count(blog.id),
            },
        })
    }

    fn user_with_blogs(&self, user: &User) -> UserWithBlogs {
        let mut blogs: Vec<Blog> = self
            .blogs
            .values()
            .filter(|b| b.user_id == user.id)
            .cloned()
            .collect();
        newest_first(&mut blogs, |b| (b.created_at, b.id));
        UserWithBlogs {
            user: user.clone(),
            blogs,
        }
    }
}

fn newest_first<T, K: Ord>(rows: &mut [T], key: impl Fn(&T) -> K) {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create_user(&self, input: NewUser) -> Result<User, StoreError> {
        let mut t = self.tables.write().await;
        if t.username_taken(&input.username, None) {
            return Err(StoreError::Constraint(format!(
                "username '{}' already exists",
                input.username
            )));
        }
        let user = User {
            id: Uuid::new_v4(),
            username: input.username,
        };
        t.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let t = self.tables.read().await;
        let mut users: Vec<User> = t.users.values().cloned().collect();
        newest_first(&mut users, |u| u.id);
        Ok(users)
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<UserWithBlogs>, StoreError> {
        let t = self.tables.read().await;
        Ok(t.users.get(&id).map(|u| t.user_with_blogs(u)))
    }

    async fn user_by_name(&self, username: &str) -> Result<Option<UserWithBlogs>, StoreError> {
        let t = self.tables.read().await;
        Ok(t.users
            .values()
            .find(|u| u.username == username)
            .map(|u| t.user_with_blogs(u)))
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<User, StoreError> {
        let mut t = self.tables.write().await;
        if !t.users.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if let Some(ref name) = changes.username {
            if t.username_taken(name, Some(id)) {
                return Err(StoreError::Constraint(format!("username '{}' already exists", name)));
            }
        }
        let user = t.users.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(name) = changes.username {
            user.username = name;
        }
        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> Result<User, StoreError> {
        let mut t = self.tables.write().await;
        if !t.users.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        let owned_blogs: Vec<Uuid> = t
            .blogs
            .values()
            .filter(|b| b.user_id == id)
            .map(|b| b.id)
            .collect();
        t.comments
            .retain(|_, c| c.user_id != id && !owned_blogs.contains(&c.blog_id));
        t.blogs.retain(|_, b| b.user_id != id);
        t.users.remove(&id).ok_or(StoreError::NotFound)
    }

    async fn create_blog(&self, input: NewBlog) -> Result<Blog, StoreError> {
        let mut t = self.tables.write().await;
        t.require_user(input.user_id)?;
        let blog = Blog {
            id: Uuid::new_v4(),
            title: input.title,
            content: input.content,
            community: input.community,
            user_id: input.user_id,
            created_at: t.next_timestamp(),
        };
        t.blogs.insert(blog.id, blog.clone());
        Ok(blog)
    }

    async fn list_blogs(
        &self,
        filter: &BlogFilter,
        page: PageRequest,
    ) -> Result<Paged<BlogSummary>, StoreError> {
        let t = self.tables.read().await;
        let mut matching: Vec<&Blog> = t.blogs.values().filter(|b| filter.matches(b)).collect();
        newest_first(&mut matching, |b| (b.created_at, b.id));
        let total = matching.len() as i64;
        let rows = matching
            .into_iter()
            .skip(page.offset().max(0) as usize)
            .take(page.limit.max(0) as usize)
            .filter_map(|b| t.summary(b))
            .collect();
        Ok(Paged { total, rows })
    }

    async fn blog_by_id(&self, id: Uuid) -> Result<Option<BlogDetail>, StoreError> {
        let t = self.tables.read().await;
        let Some(summary) = t.blogs.get(&id).and_then(|b| t.summary(b)) else {
            return Ok(None);
        };
        let mut comments: Vec<CommentWithUser> = t
            .comments
            .values()
            .filter(|c| c.blog_id == id)
            .filter_map(|c| {
                t.users.get(&c.user_id).map(|u| CommentWithUser {
                    comment: c.clone(),
                    user: u.clone(),
                })
            })
            .collect();
        newest_first(&mut comments, |c| (c.comment.created_at, c.comment.id));
        Ok(Some(BlogDetail {
            blog: summary.blog,
            user: summary.user,
            comments,
            count: summary.count,
        }))
    }

    async fn update_blog(&self, id: Uuid, changes: BlogChanges) -> Result<Blog, StoreError> {
        let mut t = self.tables.write().await;
        if !t.blogs.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if let Some(user_id) = changes.user_id {
            t.require_user(user_id)?;
        }
        let blog = t.blogs.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(title) = changes.title {
            blog.title = title;
        }
        if let Some(content) = changes.content {
            blog.content = content;
        }
        if let Some(community) = changes.community {
            blog.community = community;
        }
        if let Some(user_id) = changes.user_id {
            blog.user_id = user_id;
        }
        Ok(blog.clone())
    }

    async fn delete_blog(&self, id: Uuid) -> Result<Blog, StoreError> {
        let mut t = self.tables.write().await;
        let blog = t.blogs.remove(&id).ok_or(StoreError::NotFound)?;
        t.comments.retain(|_, c| c.blog_id != id);
        Ok(blog)
    }

    async fn create_comment(&self, input: NewComment) -> Result<Comment, StoreError> {
        let mut t = self.tables.write().await;
        t.require_user(input.user_id)?;
        if !t.blogs.contains_key(&input.blog_id) {
            return Err(StoreError::Constraint(format!(
                "blog {} does not exist",
                input.blog_id
            )));
        }
        let comment = Comment {
            id: Uuid::new_v4(),
            content: input.content,
            user_id: input.user_id,
            blog_id: input.blog_id,
            created_at: t.next_timestamp(),
        };
        t.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn list_comments(&self, blog_id: Option<Uuid>) -> Result<Vec<Comment>, StoreError> {
        let t = self.tables.read().await;
        let mut comments: Vec<Comment> = t
            .comments
            .values()
            .filter(|c| blog_id.map_or(true, |b| c.blog_id == b))
            .cloned()
            .collect();
        newest_first(&mut comments, |c| (c.created_at, c.id));
        Ok(comments)
    }

    async fn comment_by_id(&self, id: Uuid) -> Result<Option<Comment>, StoreError> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn update_comment(&self, id: Uuid, changes: CommentChanges) -> Result<Comment, StoreError> {
        let mut t = self.tables.write().await;
        let comment = t.comments.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(content) = changes.content {
            comment.content = content;
        }
        Ok(comment.clone())
    }

    async fn delete_comment(&self, id: Uuid) -> Result<Comment, StoreError> {
        self.tables
            .write()
            .await
            .comments
            .remove(&id)
            .ok_or(StoreError::NotFound)
    }
}
