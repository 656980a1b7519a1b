//! Shared configuration and common types for the hotel listing server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types and the layered loader
//! - Error response structures and error codes
//! - Pagination and health check types

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheBackend, CacheConfig, CorsConfig, DatabaseBackend, DatabaseConfig,
    Environment, JwtConfig, LoggingConfig, PasswordConfig, RateLimitConfig, ServerConfig,
};
pub use errors::{error_codes, ConfigError, ErrorResponse};
pub use types::{PaginatedResponse, RequestParams, SortOrder};
