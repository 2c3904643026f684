//! Persisted entities and the composite shapes returned by the read operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Topic category of a blog. Stored as the PostgreSQL enum type `tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "tag", rename_all = "UPPERCASE")]
pub enum Tag {
    History,
    Food,
    Pets,
    Fashion,
    Health,
    Sports,
    Technology,
    Others,
}

impl Tag {
    pub const ALL: [Tag; 8] = [
        Tag::History,
        Tag::Food,
        Tag::Pets,
        Tag::Fashion,
        Tag::Health,
        Tag::Sports,
        Tag::Technology,
        Tag::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::History => "HISTORY",
            Tag::Food => "FOOD",
            Tag::Pets => "PETS",
            Tag::Fashion => "FASHION",
            Tag::Health => "HEALTH",
            Tag::Sports => "SPORTS",
            Tag::Technology => "TECHNOLOGY",
            Tag::Others => "OTHERS",
        }
    }
}

impl FromStr for Tag {
    type Err = String;

    /// Exact, case-sensitive match on the upper-case name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Tag::ALL.iter().map(Tag::as_str).collect();
                format!("must be one of: {}", names.join(", "))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub community: Tag,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub user_id: Uuid,
    pub blog_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Relation counts attached to a blog, serialized as `_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BlogCount {
    pub comments: i64,
}

/// A user with the blogs they own (profile view).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserWithBlogs {
    #[serde(flatten)]
    pub user: User,
    pub blogs: Vec<Blog>,
}

/// One row of a blog listing: the blog, its author and its comment count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BlogSummary {
    #[serde(flatten)]
    pub blog: Blog,
    pub user: User,
    #[serde(rename = "_count")]
    pub count: BlogCount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CommentWithUser {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: User,
}

/// A blog with its author and full comment thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BlogDetail {
    #[serde(flatten)]
    pub blog: Blog,
    pub user: User,
    pub comments: Vec<CommentWithUser>,
    #[serde(rename = "_count")]
    pub count: BlogCount,
}
