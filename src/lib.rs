//! Blog API: users, blog posts and comments over PostgreSQL, served as a JSON REST API.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, StoreError};
pub use routes::{app, ApiDoc};
pub use service::{BlogService, CommentService, UserService};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_schema, PgStore, Store};
