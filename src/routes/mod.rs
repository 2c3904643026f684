//! Router assembly.

mod common;
mod openapi;
mod resources;

pub use common::common_routes;
pub use openapi::{docs_routes, ApiDoc};
pub use resources::{blog_routes, comment_routes, user_routes};

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Resource routes under the global `/api` prefix.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/blog", blog_routes())
        .nest("/comment", comment_routes())
        .nest("/user", user_routes())
}

/// Full application: `/api/...`, operational routes, API docs, request tracing and CORS.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .merge(common_routes())
        .merge(docs_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
