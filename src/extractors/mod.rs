//! Request extractors that report rejections through [`AppError`](crate::error::AppError).

mod json;

pub use json::{AppJson, AppQuery};
