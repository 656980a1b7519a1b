//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Backend for response caching and rate-limit counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Memory,
    Redis,
}

/// Cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,

    /// Redis connection URL
    pub url: String,

    /// Key prefix for all cached entries
    pub key_prefix: String,

    /// Lifetime of cached responses in seconds
    pub ttl_seconds: u64,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Connection attempts before giving up
    pub max_retries: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            url: String::from("redis://localhost:6379"),
            key_prefix: String::from("hotel_listing:"),
            ttl_seconds: 120,
            connection_timeout: 5,
            max_retries: 3,
        }
    }
}

impl CacheConfig {
    /// Redis configuration for the given URL
    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            backend: CacheBackend::Redis,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}
