//! Shared handler plumbing: error mapping and cached responses

pub mod error;
pub mod http_cache;

pub use error::{ApiError, ApiResult};
pub use http_cache::{invalidate, respond_cached};
