//! Per-client request rate limiting
//!
//! A [`RateLimitStore`] counts hits per key in fixed windows. The HTTP
//! middleware keys by client IP and turns a [`RateLimitStatus::Exceeded`]
//! into a 429.

mod memory;

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::DomainResult;

pub use memory::MemoryRateLimitStore;

/// A limit of `limit` hits per `period`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRule {
    pub limit: u32,
    pub period: Duration,
}

impl RateLimitRule {
    pub fn new(limit: u32, period: Duration) -> Self {
        Self { limit, period }
    }

    pub fn from_config(config: &hotel_shared::RateLimitConfig) -> Self {
        Self::new(config.limit, Duration::from_secs(config.period_seconds))
    }

    /// Window length in whole seconds, at least one
    pub fn period_seconds(&self) -> u64 {
        self.period.as_secs().max(1)
    }
}

/// Outcome of recording one hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitStatus {
    /// Within the limit
    Ok {
        limit: u32,
        remaining: u32,
        reset_seconds: u64,
    },
    /// Over the limit until the window resets
    Exceeded { limit: u32, retry_after_seconds: u64 },
}

impl RateLimitStatus {
    /// Status for the `count`-th hit of a window with `ttl_seconds` left
    pub fn from_count(rule: &RateLimitRule, count: u64, ttl_seconds: u64) -> Self {
        let ttl_seconds = ttl_seconds.max(1);
        if count > u64::from(rule.limit) {
            RateLimitStatus::Exceeded {
                limit: rule.limit,
                retry_after_seconds: ttl_seconds,
            }
        } else {
            RateLimitStatus::Ok {
                limit: rule.limit,
                remaining: rule.limit - count as u32,
                reset_seconds: ttl_seconds,
            }
        }
    }

    pub fn is_exceeded(&self) -> bool {
        matches!(self, RateLimitStatus::Exceeded { .. })
    }

    pub fn limit(&self) -> u32 {
        match self {
            RateLimitStatus::Ok { limit, .. } | RateLimitStatus::Exceeded { limit, .. } => *limit,
        }
    }

    pub fn remaining(&self) -> u32 {
        match self {
            RateLimitStatus::Ok { remaining, .. } => *remaining,
            RateLimitStatus::Exceeded { .. } => 0,
        }
    }
}

/// Counter storage for rate limiting
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Record a hit for `key` and report whether it is within `rule`
    async fn hit(&self, key: &str, rule: &RateLimitRule) -> DomainResult<RateLimitStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_count() {
        let rule = RateLimitRule::new(2, Duration::from_secs(5));

        let first = RateLimitStatus::from_count(&rule, 1, 5);
        assert_eq!(first.remaining(), 1);
        assert!(!first.is_exceeded());

        let second = RateLimitStatus::from_count(&rule, 2, 4);
        assert_eq!(second.remaining(), 0);

        let third = RateLimitStatus::from_count(&rule, 3, 0);
        assert_eq!(
            third,
            RateLimitStatus::Exceeded {
                limit: 2,
                retry_after_seconds: 1
            }
        );
    }

    #[test]
    fn test_rule_from_config() {
        let rule = RateLimitRule::from_config(&hotel_shared::RateLimitConfig::default());
        assert_eq!(rule.limit, 1);
        assert_eq!(rule.period_seconds(), 5);
    }
}
