//! Redis-backed caching
//!
//! A retrying [`RedisClient`] plus the two stores the HTTP layer uses when
//! the cache backend is Redis: serialized responses and rate-limit counters.

pub mod rate_limit_store;
pub mod redis_client;
pub mod response_cache;

pub use rate_limit_store::RedisRateLimitStore;
pub use redis_client::RedisClient;
pub use response_cache::RedisResponseCache;

pub use hotel_shared::CacheConfig;
