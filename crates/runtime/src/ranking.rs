//! Read-through cache in front of the store's leaderboard query.
//!
//! The cache key moves `ABSENT -> POPULATED -> ABSENT`, the last step through
//! either TTL expiry or an explicit [`RankingService::invalidate`] after a
//! committed battle. Any cache failure degrades to a store read.
//!
//! Every invalidation bumps a generation counter. A reader that saw the
//! generation move while it was querying the store does not write its
//! snapshot back, so a leaderboard read before a battle cannot outlive the
//! invalidation that battle issued.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use arena_core::RankingEntry;

use crate::api::{ArenaError, Component, Result};
use crate::cache::RankingCache;
use crate::config::ArenaConfig;
use crate::counters::ArenaCounters;
use crate::deadline::bounded;
use crate::repository::CombatantStore;

/// Cache key holding the current leaderboard.
pub const RANKING_KEY: &str = "ranking:current";

/// Lifetime of a cached leaderboard.
pub const RANKING_TTL: Duration = Duration::from_secs(60);

/// Serialized form of the cached leaderboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CachedRanking {
    pub cached_at: DateTime<Utc>,
    pub data: Vec<RankingEntry>,
}

/// Where a leaderboard read was answered from.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RankingSource {
    Cache,
    Store,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RankingView {
    pub source: RankingSource,
    /// Set only for cache hits.
    pub cached_at: Option<DateTime<Utc>>,
    pub entries: Vec<RankingEntry>,
}

#[derive(Clone)]
pub struct RankingService {
    store: Arc<dyn CombatantStore>,
    cache: Arc<dyn RankingCache>,
    counters: Arc<ArenaCounters>,
    config: ArenaConfig,
    /// Shared by every clone; bumped before each cache delete.
    generation: Arc<AtomicU64>,
}

impl RankingService {
    pub fn new(
        store: Arc<dyn CombatantStore>,
        cache: Arc<dyn RankingCache>,
        counters: Arc<ArenaCounters>,
        config: ArenaConfig,
    ) -> Self {
        Self {
            store,
            cache,
            counters,
            config,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Serves the leaderboard, repopulating the cache on a miss.
    ///
    /// Only a store failure fails the read.
    pub async fn get_ranking(&self) -> Result<RankingView> {
        if let Some(cached) = self.read_cached().await {
            self.counters.record_cache_hit();
            debug!(entries = cached.data.len(), "ranking cache hit");
            return Ok(RankingView {
                source: RankingSource::Cache,
                cached_at: Some(cached.cached_at),
                entries: cached.data,
            });
        }

        self.counters.record_cache_miss();
        debug!("ranking cache miss");

        let observed = self.generation.load(Ordering::SeqCst);
        let entries = bounded(
            Component::Store,
            "top_ranked",
            self.config.store_timeout,
            self.store.top_ranked(self.config.ranking_limit),
        )
        .await?;

        if self.generation.load(Ordering::SeqCst) == observed {
            self.populate(&entries, observed).await;
        } else {
            debug!("ranking invalidated during store read, not caching snapshot");
        }

        Ok(RankingView {
            source: RankingSource::Store,
            cached_at: None,
            entries,
        })
    }

    /// Drops the cached leaderboard. Deleting an absent key succeeds.
    pub async fn invalidate(&self) -> Result<()> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        bounded(
            Component::Cache,
            "delete",
            self.config.cache_timeout,
            self.cache.delete(RANKING_KEY),
        )
        .await
    }

    async fn read_cached(&self) -> Option<CachedRanking> {
        let lookup = bounded(
            Component::Cache,
            "get",
            self.config.cache_timeout,
            self.cache.get(RANKING_KEY),
        )
        .await;

        match lookup {
            Ok(Some(bytes)) => match serde_json::from_slice::<CachedRanking>(&bytes) {
                Ok(cached) => Some(cached),
                Err(error) => {
                    warn!(%error, "discarding undecodable ranking cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(error) => {
                warn!(%error, "ranking cache unavailable, reading from store");
                None
            }
        }
    }

    async fn populate(&self, entries: &[RankingEntry], observed: u64) {
        let cached = CachedRanking {
            cached_at: Utc::now(),
            data: entries.to_vec(),
        };
        let bytes = match serde_json::to_vec(&cached) {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(%error, "failed to encode ranking for cache");
                return;
            }
        };

        let stored: std::result::Result<(), ArenaError> = bounded(
            Component::Cache,
            "set",
            self.config.cache_timeout,
            self.cache.set(RANKING_KEY, bytes, RANKING_TTL),
        )
        .await;
        if let Err(error) = stored {
            warn!(%error, "failed to populate ranking cache");
            return;
        }

        // An invalidation that landed between the check and the set may have
        // deleted before we wrote; take the stale snapshot back out.
        if self.generation.load(Ordering::SeqCst) != observed {
            debug!("ranking invalidated during cache write, dropping snapshot");
            if let Err(error) = self.invalidate().await {
                warn!(%error, "failed to drop stale ranking snapshot");
            }
        }
    }
}
