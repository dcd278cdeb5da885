use std::time::Duration;

use arena_core::BattleRules;

/// Tunables of the arena runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    pub rules: BattleRules,
    /// Number of entries served by the leaderboard.
    pub ranking_limit: usize,
    /// Default length of the battle history listing.
    pub recent_battles_limit: usize,
    /// Upper bound for a single store call.
    pub store_timeout: Duration,
    /// Upper bound for a single cache call.
    pub cache_timeout: Duration,
    /// Start of a deterministic seed sequence; random seeds when `None`.
    pub battle_seed: Option<u64>,
}

impl ArenaConfig {
    pub const RANKING_LIMIT: usize = 10;
    pub const RECENT_BATTLES_LIMIT: usize = 20;
    pub const STORE_TIMEOUT: Duration = Duration::from_secs(2);
    pub const CACHE_TIMEOUT: Duration = Duration::from_millis(500);
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            rules: BattleRules::default(),
            ranking_limit: Self::RANKING_LIMIT,
            recent_battles_limit: Self::RECENT_BATTLES_LIMIT,
            store_timeout: Self::STORE_TIMEOUT,
            cache_timeout: Self::CACHE_TIMEOUT,
            battle_seed: None,
        }
    }
}
