//! Response cache stored in Redis

use std::time::Duration;

use async_trait::async_trait;

use hotel_core::errors::{DomainError, DomainResult};
use hotel_core::services::ResponseCache;

use super::RedisClient;

/// [`ResponseCache`] keeping entries under the configured key prefix
#[derive(Clone)]
pub struct RedisResponseCache {
    client: RedisClient,
}

impl RedisResponseCache {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(&self, key: &str) -> String {
        self.client.config().make_key(&format!("response:{}", key))
    }
}

#[async_trait]
impl ResponseCache for RedisResponseCache {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.client.get(&self.key(key)).await?)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> DomainResult<()> {
        // SETEX rejects a zero expiry
        let seconds = ttl.as_secs().max(1);
        Ok(self.client.set_with_expiry(&self.key(key), value, seconds).await?)
    }

    async fn invalidate(&self, key: &str) -> DomainResult<()> {
        self.client.delete(&self.key(key)).await?;
        Ok(())
    }

    async fn health_check(&self) -> DomainResult<()> {
        if self.client.health_check().await? {
            Ok(())
        } else {
            Err(DomainError::persistence("Redis did not answer PING with PONG"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use hotel_core::services::cache::keys;

    #[tokio::test]
    #[ignore] // Requires a running Redis server
    async fn test_set_get_invalidate() {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".into());
        let cache = RedisResponseCache::new(RedisClient::new(CacheConfig::redis(url)).await.unwrap());
        let key = keys::country(i64::MAX);

        cache.set(&key, r#"{"id":1}"#, Duration::from_secs(30)).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap().as_deref(), Some(r#"{"id":1}"#));

        cache.invalidate(&key).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap(), None);
        cache.health_check().await.unwrap();
    }
}
