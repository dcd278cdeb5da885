//! Sources of per-battle jitter seeds.

use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out the seed recorded with each battle.
pub trait SeedSource: Send + Sync {
    fn next_seed(&self) -> u64;
}

/// Fresh seed from the thread-local generator on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSeeds;

impl SeedSource for RandomSeeds {
    fn next_seed(&self) -> u64 {
        rand::random()
    }
}

/// Consecutive seeds starting at a fixed value, for reproducible sessions.
#[derive(Debug)]
pub struct SequentialSeeds {
    next: AtomicU64,
}

impl SequentialSeeds {
    pub fn starting_at(seed: u64) -> Self {
        Self {
            next: AtomicU64::new(seed),
        }
    }
}

impl SeedSource for SequentialSeeds {
    fn next_seed(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
