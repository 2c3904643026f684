//! Resource services: users, blogs and comments over an injected [`Store`](crate::store::Store).
//!
//! Each operation converts store failures into the client-facing error for that operation,
//! logging the underlying cause first.

mod blogs;
mod comments;
mod users;

pub use blogs::BlogService;
pub use comments::CommentService;
pub use users::UserService;

use crate::error::{AppError, StoreError};

/// Any failure becomes `BadRequest(message)`.
fn failed(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
    move |e| {
        log_failure(message, &e);
        AppError::BadRequest(message.to_string())
    }
}

/// A missing row becomes `NotFound(missing)`; anything else `BadRequest(message)`.
fn failed_or_missing(message: &'static str, missing: String) -> impl FnOnce(StoreError) -> AppError {
    move |e| match e {
        StoreError::NotFound => AppError::NotFound(missing),
        other => {
            log_failure(message, &other);
            AppError::BadRequest(message.to_string())
        }
    }
}

fn log_failure(message: &str, e: &StoreError) {
    match e {
        StoreError::Db(_) => tracing::error!(error = %e, "{}", message),
        _ => tracing::warn!(error = %e, "{}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_rows_keep_their_own_kind() {
        let err = failed_or_missing("Failed to update user.", "user x".into())(StoreError::NotFound);
        assert!(matches!(err, AppError::NotFound(ref m) if m == "user x"));

        let err = failed_or_missing("Failed to update user.", "user x".into())(
            StoreError::Constraint("duplicate key".into()),
        );
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Failed to update user."));
    }

    #[test]
    fn driver_errors_become_client_errors() {
        let err = failed("Failed to fetch blogs")(StoreError::Db(sqlx::Error::PoolTimedOut));
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
