//! Key-value cache contract with per-key TTL.

use std::time::Duration;

use async_trait::async_trait;

use super::error::Result;

/// Key-value store with per-key expiry.
///
/// An expired key must be indistinguishable from an absent one.
#[async_trait]
pub trait RankingCache: Send + Sync {
    /// Returns the live value for `key`, `None` on miss or expiry.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous entry.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;

    /// Removes `key`. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Liveness probe for health checks.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
