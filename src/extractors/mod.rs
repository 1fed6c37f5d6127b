//! Request extractors that reject with [`crate::error::AppError`] instead of axum's plain-text bodies.

mod json;
mod query;

pub use json::JsonBody;
pub use query::QueryParams;
