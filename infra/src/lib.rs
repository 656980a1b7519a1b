//! # Infrastructure Layer
//!
//! Concrete backends for the hotel listing core:
//!
//! - **Database**: MySQL implementations of the data store and the identity
//!   repositories using SQLx, plus embedded migrations
//! - **Cache**: Redis client, response cache and rate-limit counters
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis caching support (default)

use hotel_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and operations
pub mod cache;

pub use cache::{RedisClient, RedisRateLimitStore, RedisResponseCache};
pub use database::{DatabasePool, MySqlStore, MySqlTokenRepository, MySqlUserRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::persistence(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_error_becomes_persistence() {
        let err: DomainError = InfrastructureError::Config("bad url".into()).into();
        assert!(matches!(err, DomainError::Persistence { .. }));
        assert_eq!(err.to_string(), "Persistence error: Configuration error: bad url");
    }
}
