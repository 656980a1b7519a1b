//! OpenAPI description of the error envelope

use serde::Serialize;
use utoipa::ToSchema;

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "NOT_FOUND")]
    pub error: String,

    #[schema(example = "Resource not found: Country 42")]
    pub message: String,

    /// `fields` maps each invalid field to its messages
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,

    #[schema(value_type = String, format = DateTime)]
    pub timestamp: String,
}
