//! Server-side response caching
//!
//! Cached entries are the serialized JSON bodies of single-resource GETs,
//! keyed by request path.

mod memory;

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::DomainResult;

pub use memory::MemoryResponseCache;

/// Key-value store for serialized responses
#[async_trait]
pub trait ResponseCache: Send + Sync {
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Store `value` under `key`, expiring after `ttl`
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> DomainResult<()>;

    /// Drop `key`; missing keys are not an error
    async fn invalidate(&self, key: &str) -> DomainResult<()>;

    /// Fails when the backing store cannot be reached
    async fn health_check(&self) -> DomainResult<()> {
        Ok(())
    }
}

/// Cache keys for cached resources
pub mod keys {
    pub fn country(id: i64) -> String {
        format!("/api/country/{}", id)
    }

    pub fn hotel(id: i64) -> String {
        format!("/api/hotel/{}", id)
    }
}
