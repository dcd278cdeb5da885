//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use arena_runtime::ArenaConfig;

/// Which store adapter backs the arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreKind {
    Memory,
    #[default]
    File,
}

/// Configuration required to bootstrap the arena service.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub store: StoreKind,
    /// Directory of the file store; platform data dir when unset.
    pub data_dir: Option<PathBuf>,
    /// RON roster to enrol; the built-in roster when unset.
    pub roster_path: Option<PathBuf>,
    /// Directory for rolling log files; stderr only when unset.
    pub log_dir: Option<PathBuf>,
    pub arena: ArenaConfig,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_STORE` - `memory` or `file` (default: file)
    /// - `ARENA_DATA_DIR` - File store directory (default: platform-specific)
    /// - `ARENA_ROSTER` - RON roster file (default: built-in roster)
    /// - `ARENA_RANKING_LIMIT` - Leaderboard length (default: 10)
    /// - `ARENA_RECENT_BATTLES` - Battle history length (default: 20)
    /// - `ARENA_STORE_TIMEOUT_MS` - Per-call store timeout (default: 2000)
    /// - `ARENA_CACHE_TIMEOUT_MS` - Per-call cache timeout (default: 500)
    /// - `ARENA_BATTLE_SEED` - First seed of a reproducible session (default: random)
    /// - `ARENA_LOG_DIR` - Write daily log files here as well
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(store) = read_env::<StoreKind>("ARENA_STORE") {
            config.store = store;
        }

        config.data_dir = env::var("ARENA_DATA_DIR").ok().map(PathBuf::from);
        config.roster_path = env::var("ARENA_ROSTER").ok().map(PathBuf::from);
        config.log_dir = env::var("ARENA_LOG_DIR").ok().map(PathBuf::from);

        if let Some(limit) = read_env::<usize>("ARENA_RANKING_LIMIT") {
            config.arena.ranking_limit = limit.max(1);
        }
        if let Some(limit) = read_env::<usize>("ARENA_RECENT_BATTLES") {
            config.arena.recent_battles_limit = limit.max(1);
        }
        if let Some(ms) = read_env::<u64>("ARENA_STORE_TIMEOUT_MS") {
            config.arena.store_timeout = Duration::from_millis(ms.max(1));
        }
        if let Some(ms) = read_env::<u64>("ARENA_CACHE_TIMEOUT_MS") {
            config.arena.cache_timeout = Duration::from_millis(ms.max(1));
        }
        config.arena.battle_seed = read_env::<u64>("ARENA_BATTLE_SEED");

        config
    }

    /// Resolved file store directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

/// Platform data directory for the arena.
///
/// - macOS: `~/Library/Application Support/arena`
/// - Linux: `~/.local/share/arena` (or `$XDG_DATA_HOME/arena`)
/// - Windows: `%APPDATA%\arena`
/// - Fallback: `./arena_data`
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "arena")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./arena_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
