//! Integration tests for the Redis-backed cache stores
//!
//! These tests require a running Redis instance.
//! Run with: cargo test -p hotel_infra --test redis_integration -- --ignored

use std::time::Duration;

use hotel_core::services::cache::keys;
use hotel_core::services::{RateLimitRule, RateLimitStore, ResponseCache};
use hotel_infra::cache::{CacheConfig, RedisClient, RedisRateLimitStore, RedisResponseCache};

fn redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
}

async fn client(prefix: &str) -> RedisClient {
    let mut config = CacheConfig::redis(redis_url());
    config.key_prefix = prefix.to_string();
    RedisClient::new(config).await.expect("Failed to connect to Redis")
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_health_check() {
    let client = client("hotel_listing_test:").await;
    assert!(client.health_check().await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_counter_expiry_starts_on_first_increment() {
    let client = client("hotel_listing_test:").await;
    let key = format!("counter:{}", uuid::Uuid::new_v4());

    assert_eq!(client.increment(&key, Some(30)).await.unwrap(), 1);
    assert_eq!(client.increment(&key, Some(30)).await.unwrap(), 2);

    let ttl = client.ttl(&key).await.unwrap().expect("expiry set");
    assert!(ttl > 0 && ttl <= 30);

    assert!(client.delete(&key).await.unwrap());
    assert_eq!(client.ttl(&key).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_prefixes_isolate_instances() {
    let first = RedisResponseCache::new(client(&format!("{}:", uuid::Uuid::new_v4())).await);
    let second = RedisResponseCache::new(client(&format!("{}:", uuid::Uuid::new_v4())).await);
    let key = keys::hotel(1);

    first.set(&key, "cached", Duration::from_secs(30)).await.unwrap();
    assert_eq!(first.get(&key).await.unwrap().as_deref(), Some("cached"));
    assert_eq!(second.get(&key).await.unwrap(), None);

    first.invalidate(&key).await.unwrap();
    assert_eq!(first.get(&key).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_rate_limit_window_resets() {
    let store = RedisRateLimitStore::new(client(&format!("{}:", uuid::Uuid::new_v4())).await);
    let rule = RateLimitRule::new(1, Duration::from_secs(1));

    assert!(!store.hit("ip:10.0.0.1", &rule).await.unwrap().is_exceeded());
    assert!(store.hit("ip:10.0.0.1", &rule).await.unwrap().is_exceeded());

    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert!(!store.hit("ip:10.0.0.1", &rule).await.unwrap().is_exceeded());
}
