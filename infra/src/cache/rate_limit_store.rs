//! Fixed-window rate-limit counters stored in Redis
//!
//! Each window is one key: INCR counts the hit and the first hit of a
//! window sets its expiry. Instances behind a load balancer share counts.

use async_trait::async_trait;

use hotel_core::errors::DomainResult;
use hotel_core::services::{RateLimitRule, RateLimitStatus, RateLimitStore};

use super::RedisClient;

#[derive(Clone)]
pub struct RedisRateLimitStore {
    client: RedisClient,
}

impl RedisRateLimitStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(&self, key: &str) -> String {
        self.client.config().make_key(&format!("rate_limit:{}", key))
    }
}

#[async_trait]
impl RateLimitStore for RedisRateLimitStore {
    async fn hit(&self, key: &str, rule: &RateLimitRule) -> DomainResult<RateLimitStatus> {
        let key = self.key(key);
        let period = rule.period_seconds();

        let count = self.client.increment(&key, Some(period)).await?;
        let ttl = match self.client.ttl(&key).await? {
            Some(ttl) => ttl as u64,
            None => {
                // A counter left without expiry would block the client forever
                self.client.expire(&key, period).await?;
                period
            }
        };

        Ok(RateLimitStatus::from_count(rule, count.max(0) as u64, ttl))
    }
}
