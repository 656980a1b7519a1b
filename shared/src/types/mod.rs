//! Type definitions module
//!
//! - `common` - Sorting primitives
//! - `pagination` - Paging parameters and paged responses for list endpoints
//! - `response` - Health check responses

pub mod common;
pub mod pagination;
pub mod response;

pub use common::SortOrder;
pub use pagination::{PaginatedResponse, RequestParams, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use response::{HealthResponse, HealthStatus, ServiceHealth};
