//! Request extractors that reject with the JSON error body instead of axum's plain text.

mod json;
mod path;
mod query;

pub use json::ApiJson;
pub use path::ApiPath;
pub use query::ApiQuery;
