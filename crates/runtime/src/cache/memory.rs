//! In-memory RankingCache implementation.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use super::error::{CacheError, Result};
use super::traits::RankingCache;

struct Slot {
    value: Vec<u8>,
    expires_at: Instant,
}

impl Slot {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Process-local cache with lazy expiry.
///
/// Expiry instants come from `tokio::time`, so a paused test clock can step
/// across a TTL deterministically.
#[derive(Default)]
pub struct InMemoryRankingCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl InMemoryRankingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining lifetime of a live key.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let slots = self.slots.lock().ok()?;
        let now = Instant::now();
        slots
            .get(key)
            .filter(|slot| slot.is_live(now))
            .map(|slot| slot.expires_at - now)
    }

    /// Whether `key` currently holds a live entry.
    pub fn contains(&self, key: &str) -> bool {
        self.ttl_remaining(key).is_some()
    }
}

#[async_trait]
impl RankingCache for InMemoryRankingCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut slots = self.slots.lock().map_err(|_| CacheError::LockPoisoned)?;
        let now = Instant::now();
        match slots.get(key) {
            Some(slot) if slot.is_live(now) => Ok(Some(slot.value.clone())),
            Some(_) => {
                slots.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let mut slots = self.slots.lock().map_err(|_| CacheError::LockPoisoned)?;
        slots.insert(
            key.to_string(),
            Slot {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut slots = self.slots.lock().map_err(|_| CacheError::LockPoisoned)?;
        slots.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = InMemoryRankingCache::new();
        cache
            .set("k", b"v".to_vec(), Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get("k").await.unwrap(), Some(b"v".to_vec()));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(!cache.contains("k"));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let cache = InMemoryRankingCache::new();
        cache.delete("missing").await.unwrap();

        cache
            .set("k", b"v".to_vec(), Duration::from_secs(60))
            .await
            .unwrap();
        cache.delete("k").await.unwrap();
        cache.delete("k").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_replaces_and_refreshes_ttl() {
        let cache = InMemoryRankingCache::new();
        cache
            .set("k", b"old".to_vec(), Duration::from_secs(10))
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(8)).await;
        cache
            .set("k", b"new".to_vec(), Duration::from_secs(10))
            .await
            .unwrap();

        assert_eq!(cache.ttl_remaining("k"), Some(Duration::from_secs(10)));
        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(cache.get("k").await.unwrap(), Some(b"new".to_vec()));
    }
}
