//! Fixed-window rate limit counters held in process memory

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::errors::DomainResult;

use super::{RateLimitRule, RateLimitStatus, RateLimitStore};

/// Windows are swept once the map grows past this many keys
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u64,
}

/// In-memory fixed-window counter store
#[derive(Debug, Default)]
pub struct MemoryRateLimitStore {
    windows: Mutex<HashMap<String, Window>>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateLimitStore for MemoryRateLimitStore {
    async fn hit(&self, key: &str, rule: &RateLimitRule) -> DomainResult<RateLimitStatus> {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;

        if windows.len() > SWEEP_THRESHOLD {
            windows.retain(|_, w| now.duration_since(w.started) < rule.period);
        }

        let window = windows
            .entry(key.to_string())
            .and_modify(|w| {
                if now.duration_since(w.started) >= rule.period {
                    *w = Window { started: now, count: 0 };
                }
            })
            .or_insert(Window { started: now, count: 0 });
        window.count += 1;

        let elapsed = now.duration_since(window.started);
        let ttl = rule.period.saturating_sub(elapsed);
        // Round up so a client never retries before the window closes
        let ttl_seconds = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);

        Ok(RateLimitStatus::from_count(rule, window.count, ttl_seconds))
    }
}
