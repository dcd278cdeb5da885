//! Per-service request counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters owned by one service instance and shared with its collaborators.
#[derive(Debug, Default)]
pub struct ArenaCounters {
    battles: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CountersSnapshot {
    pub battles: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

impl ArenaCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_battle(&self) {
        self.battles.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            battles: self.battles.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
        }
    }
}
