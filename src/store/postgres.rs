//! PostgreSQL implementation of [`Store`] over a shared `PgPool`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    BlogChanges, BlogFilter, CommentChanges, NewBlog, NewComment, NewUser, PageRequest, Paged,
    Store, UserChanges,
};
use crate::error::StoreError;
use crate::models::{
    Blog, BlogCount, BlogDetail, BlogSummary, Comment, CommentWithUser, Tag, User, UserWithBlogs,
};

const BLOG_COLUMNS: &str = "id, title, content, community, user_id, created_at";
const COMMENT_COLUMNS: &str = "id, content, user_id, blog_id, created_at";

/// Blog joined with its author and comment count.
#[derive(sqlx::FromRow)]
struct BlogSummaryRow {
    id: Uuid,
    title: String,
    content: String,
    community: Tag,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    username: String,
    comment_count: i64,
}

impl From<BlogSummaryRow> for BlogSummary {
    fn from(r: BlogSummaryRow) -> Self {
        BlogSummary {
            user: User {
                id: r.user_id,
                username: r.username,
            },
            blog: Blog {
                id: r.id,
                title: r.title,
                content: r.content,
                community: r.community,
                user_id: r.user_id,
                created_at: r.created_at,
            },
            count: BlogCount {
                comments: r.comment_count,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentUserRow {
    id: Uuid,
    content: String,
    user_id: Uuid,
    blog_id: Uuid,
    created_at: DateTime<Utc>,
    username: String,
}

impl From<CommentUserRow> for CommentWithUser {
    fn from(r: CommentUserRow) -> Self {
        CommentWithUser {
            user: User {
                id: r.user_id,
                username: r.username,
            },
            comment: Comment {
                id: r.id,
                content: r.content,
                user_id: r.user_id,
                blog_id: r.blog_id,
                created_at: r.created_at,
            },
        }
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn user_with_blogs(&self, user: Option<User>) -> Result<Option<UserWithBlogs>, StoreError> {
        let Some(user) = user else {
            return Ok(None);
        };
        let sql = format!(
            "SELECT {} FROM blogs WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
            BLOG_COLUMNS
        );
        let blogs = sqlx::query_as::<_, Blog>(&sql)
            .bind(user.id)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(Some(UserWithBlogs { user, blogs }))
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(())
    }

    async fn create_user(&self, input: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>("INSERT INTO users (id, username) VALUES ($1, $2) RETURNING id, username")
            .bind(Uuid::new_v4())
            .bind(&input.username)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        sqlx::query_as::<_, User>("SELECT id, username FROM users ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<UserWithBlogs>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;
        self.user_with_blogs(user).await
    }

    async fn user_by_name(&self, username: &str) -> Result<Option<UserWithBlogs>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;
        self.user_with_blogs(user).await
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET username = COALESCE($2, username) WHERE id = $1 RETURNING id, username",
        )
        .bind(id)
        .bind(changes.username)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)?
        .ok_or(StoreError::NotFound)
    }

    async fn delete_user(&self, id: Uuid) -> Result<User, StoreError> {
        let mut tx = self.pool.begin().await.map_err(StoreError::from_sqlx)?;

        let comments = sqlx::query(
            r#"
            DELETE FROM comments
            WHERE user_id = $1
               OR blog_id IN (SELECT id FROM blogs WHERE user_id = $1)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::from_sqlx)?;

        let blogs = sqlx::query("DELETE FROM blogs WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::from_sqlx)?;

        let user = sqlx::query_as::<_, User>("DELETE FROM users WHERE id = $1 RETURNING id, username")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(StoreError::from_sqlx)?
            .ok_or(StoreError::NotFound)?;

        tx.commit().await.map_err(StoreError::from_sqlx)?;
        tracing::debug!(
            user_id = %id,
            comments = comments.rows_affected(),
            blogs = blogs.rows_affected(),
            "user deleted with cascade"
        );
        Ok(user)
    }

    async fn create_blog(&self, input: NewBlog) -> Result<Blog, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO blogs (id, title, content, community, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            BLOG_COLUMNS
        );
        sqlx::query_as::<_, Blog>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.community)
            .bind(input.user_id)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn list_blogs(
        &self,
        filter: &BlogFilter,
        page: PageRequest,
    ) -> Result<Paged<BlogSummary>, StoreError> {
        const WHERE: &str = "($1::tag IS NULL OR b.community = $1) AND ($2::uuid IS NULL OR b.user_id = $2)";

        let count_sql = format!("SELECT COUNT(*) FROM blogs b WHERE {}", WHERE);
        let (total,): (i64,) = sqlx::query_as(&count_sql)
            .bind(filter.tag)
            .bind(filter.user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;

        let list_sql = format!(
            r#"
            SELECT
                b.id,
                b.title,
                b.content,
                b.community,
                b.user_id,
                b.created_at,
                u.username,
                (SELECT COUNT(*) FROM comments c WHERE c.blog_id = b.id) AS comment_count
            FROM
                blogs b
            JOIN
                users u ON u.id = b.user_id
            WHERE
                {}
            ORDER BY
                b.created_at DESC, b.id DESC
            LIMIT $3 OFFSET $4
            "#,
            WHERE
        );
        tracing::debug!(sql = %list_sql, tag = ?filter.tag, user_id = ?filter.user_id, "query");
        let rows = sqlx::query_as::<_, BlogSummaryRow>(&list_sql)
            .bind(filter.tag)
            .bind(filter.user_id)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;

        Ok(Paged {
            total,
            rows: rows.into_iter().map(Into::into).collect(),
        })
    }

    async fn blog_by_id(&self, id: Uuid) -> Result<Option<BlogDetail>, StoreError> {
        let row = sqlx::query_as::<_, BlogSummaryRow>(
            r#"
            SELECT
                b.id,
                b.title,
                b.content,
                b.community,
                b.user_id,
                b.created_at,
                u.username,
                (SELECT COUNT(*) FROM comments c WHERE c.blog_id = b.id) AS comment_count
            FROM
                blogs b
            JOIN
                users u ON u.id = b.user_id
            WHERE
                b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)?;

        let Some(summary) = row.map(BlogSummary::from) else {
            return Ok(None);
        };

        let comments = sqlx::query_as::<_, CommentUserRow>(
            r#"
            SELECT c.id, c.content, c.user_id, c.blog_id, c.created_at, u.username
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.blog_id = $1
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)?;

        Ok(Some(BlogDetail {
            blog: summary.blog,
            user: summary.user,
            comments: comments.into_iter().map(Into::into).collect(),
            count: summary.count,
        }))
    }

    async fn update_blog(&self, id: Uuid, changes: BlogChanges) -> Result<Blog, StoreError> {
        let sql = format!(
            r#"
            UPDATE
                blogs
            SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                community = COALESCE($4, community),
                user_id = COALESCE($5, user_id)
            WHERE
                id = $1
            RETURNING {}
            "#,
            BLOG_COLUMNS
        );
        sqlx::query_as::<_, Blog>(&sql)
            .bind(id)
            .bind(changes.title)
            .bind(changes.content)
            .bind(changes.community)
            .bind(changes.user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?
            .ok_or(StoreError::NotFound)
    }

    async fn delete_blog(&self, id: Uuid) -> Result<Blog, StoreError> {
        let mut tx = self.pool.begin().await.map_err(StoreError::from_sqlx)?;

        sqlx::query("DELETE FROM comments WHERE blog_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::from_sqlx)?;

        let sql = format!("DELETE FROM blogs WHERE id = $1 RETURNING {}", BLOG_COLUMNS);
        let blog = sqlx::query_as::<_, Blog>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(StoreError::from_sqlx)?
            .ok_or(StoreError::NotFound)?;

        tx.commit().await.map_err(StoreError::from_sqlx)?;
        Ok(blog)
    }

    async fn create_comment(&self, input: NewComment) -> Result<Comment, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO comments (id, content, user_id, blog_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COMMENT_COLUMNS
        );
        sqlx::query_as::<_, Comment>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.content)
            .bind(input.user_id)
            .bind(input.blog_id)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn list_comments(&self, blog_id: Option<Uuid>) -> Result<Vec<Comment>, StoreError> {
        let sql = format!(
            r#"
            SELECT {}
            FROM comments
            WHERE ($1::uuid IS NULL OR blog_id = $1)
            ORDER BY created_at DESC, id DESC
            "#,
            COMMENT_COLUMNS
        );
        sqlx::query_as::<_, Comment>(&sql)
            .bind(blog_id)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn comment_by_id(&self, id: Uuid) -> Result<Option<Comment>, StoreError> {
        let sql = format!("SELECT {} FROM comments WHERE id = $1", COMMENT_COLUMNS);
        sqlx::query_as::<_, Comment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn update_comment(&self, id: Uuid, changes: CommentChanges) -> Result<Comment, StoreError> {
        let sql = format!(
            "UPDATE comments SET content = COALESCE($2, content) WHERE id = $1 RETURNING {}",
            COMMENT_COLUMNS
        );
        sqlx::query_as::<_, Comment>(&sql)
            .bind(id)
            .bind(changes.content)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?
            .ok_or(StoreError::NotFound)
    }

    async fn delete_comment(&self, id: Uuid) -> Result<Comment, StoreError> {
        let sql = format!("DELETE FROM comments WHERE id = $1 RETURNING {}", COMMENT_COLUMNS);
        sqlx::query_as::<_, Comment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?
            .ok_or(StoreError::NotFound)
    }
}
