//! Request shapes and their validation.
//!
//! Every inbound payload is deserialized leniently (all fields optional, strings kept raw)
//! and then checked by an explicit `validate` function that either yields the typed input
//! for the store or the full list of field errors. Emptiness checks are literal: `""` is
//! rejected, whitespace is not trimmed.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::Tag;
use crate::store::{
    BlogChanges, BlogFilter, CommentChanges, NewBlog, NewComment, NewUser, PageRequest,
    UserChanges,
};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Outcome of validating one input shape.
pub type Validated<T> = Result<T, Vec<FieldError>>;

/// Collects field errors while a shape is being checked.
#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    fn required_text(&mut self, field: &str, value: Option<String>) -> Option<String> {
        match value {
            None => {
                self.fail(field, format!("{} is required", field));
                None
            }
            Some(s) if s.is_empty() => {
                self.fail(field, format!("{} should not be empty", field));
                None
            }
            Some(s) => Some(s),
        }
    }

    fn optional_text(&mut self, field: &str, value: Option<String>) -> Option<String> {
        match value {
            Some(s) if s.is_empty() => {
                self.fail(field, format!("{} should not be empty", field));
                None
            }
            other => other,
        }
    }

    fn uuid(&mut self, field: &str, value: Option<&str>) -> Option<Uuid> {
        let s = value?;
        match Uuid::parse_str(s) {
            Ok(u) => Some(u),
            Err(_) => {
                self.fail(field, format!("{} must be a valid UUID", field));
                None
            }
        }
    }

    fn required_uuid(&mut self, field: &str, value: Option<String>) -> Option<Uuid> {
        if value.is_none() {
            self.fail(field, format!("{} is required", field));
            return None;
        }
        self.uuid(field, value.as_deref())
    }

    fn tag(&mut self, field: &str, value: Option<&str>) -> Option<Tag> {
        let s = value?;
        match s.parse::<Tag>() {
            Ok(t) => Some(t),
            Err(msg) => {
                self.fail(field, format!("{} {}", field, msg));
                None
            }
        }
    }

    fn bounded_int(&mut self, field: &str, value: Option<&str>, min: i64, max: i64) -> Option<i64> {
        let s = value?;
        match s.parse::<i64>() {
            Ok(n) if n < min => {
                self.fail(field, format!("{} must not be less than {}", field, min));
                None
            }
            Ok(n) if n > max => {
                self.fail(field, format!("{} must not be greater than {}", field, max));
                None
            }
            Ok(n) => Some(n),
            Err(_) => {
                self.fail(field, format!("{} must be an integer", field));
                None
            }
        }
    }

    /// Required checks record an error before yielding `None`, so `value` is only
    /// empty when `errors` is not.
    fn finish<T>(self, value: impl FnOnce() -> Option<T>) -> Validated<T> {
        match value() {
            Some(v) if self.errors.is_empty() => Ok(v),
            _ => Err(self.errors),
        }
    }
}

/// Parse a path identifier. Malformed ids are a shape violation.
pub fn parse_id(field: &str, raw: &str) -> Validated<Uuid> {
    Uuid::parse_str(raw).map_err(|_| vec![FieldError::new(field, format!("{} must be a valid UUID", field))])
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "user")]
    pub username: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(self) -> Validated<NewUser> {
        let mut c = Checker::default();
        let username = c.required_text("username", self.username);
        c.finish(|| Some(NewUser { username: username? }))
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(self) -> Validated<UserChanges> {
        let mut c = Checker::default();
        let username = c.optional_text("username", self.username);
        c.finish(|| Some(UserChanges { username }))
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    #[schema(example = "Title")]
    pub title: Option<String>,
    #[schema(example = "Content")]
    pub content: Option<String>,
    #[schema(example = "HISTORY")]
    pub community: Option<String>,
    pub user_id: Option<String>,
}

impl CreateBlogRequest {
    pub fn validate(self) -> Validated<NewBlog> {
        let mut c = Checker::default();
        let title = c.required_text("title", self.title);
        let content = c.required_text("content", self.content);
        let community = match self.community.as_deref() {
            None => {
                c.fail("community", "community is required");
                None
            }
            some => c.tag("community", some),
        };
        let user_id = c.required_uuid("userId", self.user_id);
        c.finish(|| {
            Some(NewBlog {
                title: title?,
                content: content?,
                community: community?,
                user_id: user_id?,
            })
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub community: Option<String>,
    pub user_id: Option<String>,
}

impl UpdateBlogRequest {
    pub fn validate(self) -> Validated<BlogChanges> {
        let mut c = Checker::default();
        let title = c.optional_text("title", self.title);
        let content = c.optional_text("content", self.content);
        let community = c.tag("community", self.community.as_deref());
        let user_id = c.uuid("userId", self.user_id.as_deref());
        c.finish(|| {
            Some(BlogChanges {
                title,
                content,
                community,
                user_id,
            })
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[schema(example = "Comment")]
    pub content: Option<String>,
    pub user_id: Option<String>,
    pub blog_id: Option<String>,
}

impl CreateCommentRequest {
    pub fn validate(self) -> Validated<NewComment> {
        let mut c = Checker::default();
        let content = c.required_text("content", self.content);
        let user_id = c.required_uuid("userId", self.user_id);
        let blog_id = c.required_uuid("blogId", self.blog_id);
        c.finish(|| {
            Some(NewComment {
                content: content?,
                user_id: user_id?,
                blog_id: blog_id?,
            })
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCommentRequest {
    pub content: Option<String>,
}

impl UpdateCommentRequest {
    pub fn validate(self) -> Validated<CommentChanges> {
        let mut c = Checker::default();
        let content = c.optional_text("content", self.content);
        c.finish(|| Some(CommentChanges { content }))
    }
}

/// Query string of the blog listings. Values are kept raw so bad input becomes field errors.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BlogListQuery {
    /// Filter by tag
    pub tag: Option<String>,
    /// Page number for pagination (default 1)
    pub page: Option<String>,
    /// Number of blogs per page, 1..=100 (default 10)
    pub limit: Option<String>,
}

impl BlogListQuery {
    pub fn validate(self) -> Validated<(BlogFilter, PageRequest)> {
        let mut c = Checker::default();
        let tag = c.tag("tag", self.tag.as_deref().filter(|s| !s.is_empty()));
        let page = c.bounded_int("page", self.page.as_deref(), 1, i64::MAX);
        let limit = c.bounded_int("limit", self.limit.as_deref(), 1, MAX_LIMIT);
        c.finish(|| {
            Some((
                BlogFilter { tag, user_id: None },
                PageRequest {
                    page: page.unwrap_or(DEFAULT_PAGE),
                    limit: limit.unwrap_or(DEFAULT_LIMIT),
                },
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn blog_create_requires_non_empty_title_and_content() {
        let req = CreateBlogRequest {
            title: Some(String::new()),
            content: None,
            community: Some("HISTORY".into()),
            user_id: Some(Uuid::new_v4().to_string()),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(fields(&errors), vec!["title", "content"]);
    }

    #[test]
    fn whitespace_is_not_trimmed() {
        let req = CreateCommentRequest {
            content: Some("   ".into()),
            user_id: Some(Uuid::new_v4().to_string()),
            blog_id: Some(Uuid::new_v4().to_string()),
        };
        assert_eq!(req.validate().unwrap().content, "   ");
    }

    #[test]
    fn blog_create_rejects_unknown_tag_and_bad_user_id() {
        let req = CreateBlogRequest {
            title: Some("t".into()),
            content: Some("c".into()),
            community: Some("GARDENING".into()),
            user_id: Some("not-a-uuid".into()),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(fields(&errors), vec!["community", "userId"]);
    }

    #[test]
    fn blog_update_accepts_partial_and_rejects_empty() {
        let ok = UpdateBlogRequest {
            content: Some("new".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(ok.content.as_deref(), Some("new"));
        assert!(ok.title.is_none());

        let err = UpdateBlogRequest {
            title: Some(String::new()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(fields(&err), vec!["title"]);
    }

    #[test]
    fn list_query_defaults_and_bounds() {
        let (filter, page) = BlogListQuery::default().validate().unwrap();
        assert!(filter.tag.is_none());
        assert_eq!((page.page, page.limit), (1, 10));

        let (filter, page) = BlogListQuery {
            tag: Some("FOOD".into()),
            page: Some("3".into()),
            limit: Some("100".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(filter.tag, Some(Tag::Food));
        assert_eq!(page.offset(), 200);

        let errors = BlogListQuery {
            tag: None,
            page: Some("0".into()),
            limit: Some("101".into()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(fields(&errors), vec!["page", "limit"]);

        let errors = BlogListQuery {
            limit: Some("ten".into()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors[0].message, "limit must be an integer");
    }

    #[test]
    fn path_ids_must_be_uuids() {
        assert!(parse_id("id", "abc").is_err());
        let id = Uuid::new_v4();
        assert_eq!(parse_id("id", &id.to_string()).unwrap(), id);
    }

    #[test]
    fn empty_bodies_name_every_missing_field() {
        let errors = CreateBlogRequest::default().validate().unwrap_err();
        assert_eq!(fields(&errors), vec!["title", "content", "community", "userId"]);

        let errors = CreateCommentRequest::default().validate().unwrap_err();
        assert_eq!(fields(&errors), vec!["content", "userId", "blogId"]);

        let errors = CreateUserRequest::default().validate().unwrap_err();
        assert_eq!(fields(&errors), vec!["username"]);
    }
}
