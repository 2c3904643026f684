//! HTTP handlers: validate the inbound shape, call the resource service, wrap the result.

pub mod blogs;
pub mod comments;
pub mod users;
