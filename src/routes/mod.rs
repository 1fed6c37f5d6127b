//! Route groups and the assembled application router.

mod common;
mod docs;
mod school;

pub use common::{common_routes, common_routes_with_ready};
pub use docs::{docs_routes, ApiDoc};
pub use school::school_routes;

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, http::Uri, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Full application: health, docs and school routes with request tracing and a body size limit.
/// Oversized bodies are rejected by the JSON extractor so the 413 carries the usual error body.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(docs_routes())
        .merge(school_routes(state))
        .fallback(no_route)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
}

async fn no_route(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}
