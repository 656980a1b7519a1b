//! Response cache held in process memory

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::errors::DomainResult;

use super::ResponseCache;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-memory response cache with per-entry expiry
#[derive(Debug, Default)]
pub struct MemoryResponseCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl ResponseCache for MemoryResponseCache {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Expired
        let mut entries = self.entries.write().await;
        if entries.get(key).map_or(false, |e| e.expires_at <= now) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> DomainResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> DomainResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cache::keys;

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = MemoryResponseCache::new();
        let key = keys::country(1);
        cache.set(&key, "{\"id\":1}", Duration::from_secs(120)).await.unwrap();

        tokio::time::advance(Duration::from_secs(119)).await;
        assert_eq!(cache.get(&key).await.unwrap().as_deref(), Some("{\"id\":1}"));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get(&key).await.unwrap(), None);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_invalidate() {
        let cache = MemoryResponseCache::new();
        cache.set(&keys::hotel(3), "{}", Duration::from_secs(60)).await.unwrap();
        cache.invalidate(&keys::hotel(3)).await.unwrap();
        cache.invalidate(&keys::hotel(4)).await.unwrap();
        assert!(cache.get(&keys::hotel(3)).await.unwrap().is_none());
    }
}
