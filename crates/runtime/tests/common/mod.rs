//! Shared fixtures for the runtime integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use arena_core::{
    BattleId, BattleRecord, BattleSummary, Combatant, CombatantId, CombatantSpec, NewBattleRecord,
    RankingEntry, StatsDelta,
};
use arena_runtime::cache::{self, CacheError, RankingCache};
use arena_runtime::repository::{self, ArenaTotals, BattleCommit, CombatantStore, RepositoryError};
use arena_runtime::{ArenaConfig, ArenaService, InMemoryCombatantStore, InMemoryRankingCache};

pub fn spec(name: &str, level: u32, attack: u32, defense: u32, health: u32) -> CombatantSpec {
    CombatantSpec {
        name: name.to_string(),
        class: "Warrior".to_string(),
        level,
        attack_power: attack,
        defense_power: defense,
        health_points: health,
    }
}

/// Four fighters plus one with no health left (id 5).
pub fn roster() -> Vec<CombatantSpec> {
    vec![
        spec("Aria", 5, 50, 30, 100),
        spec("Brom", 4, 45, 25, 120),
        spec("Cyra", 6, 60, 20, 90),
        spec("Dusk", 3, 35, 40, 140),
        spec("Husk", 1, 10, 10, 0),
    ]
}

pub fn config() -> ArenaConfig {
    ArenaConfig {
        battle_seed: Some(7),
        ..ArenaConfig::default()
    }
}

pub struct Arena {
    pub store: Arc<InMemoryCombatantStore>,
    pub cache: Arc<InMemoryRankingCache>,
    pub service: ArenaService,
}

pub fn arena() -> Arena {
    let store = Arc::new(InMemoryCombatantStore::with_roster(roster()));
    let cache = Arc::new(InMemoryRankingCache::new());
    let service = ArenaService::builder(store.clone())
        .cache(cache.clone())
        .config(config())
        .build();
    Arena {
        store,
        cache,
        service,
    }
}

/// Cache whose every call fails, or never returns when `hang` is set.
pub struct BrokenCache {
    pub hang: bool,
}

impl BrokenCache {
    async fn fail<T>(&self) -> cache::Result<T> {
        if self.hang {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        Err(CacheError::Unavailable("connection refused".to_string()))
    }
}

#[async_trait]
impl RankingCache for BrokenCache {
    async fn get(&self, _key: &str) -> cache::Result<Option<Vec<u8>>> {
        self.fail().await
    }

    async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> cache::Result<()> {
        self.fail().await
    }

    async fn delete(&self, _key: &str) -> cache::Result<()> {
        self.fail().await
    }

    async fn ping(&self) -> cache::Result<()> {
        self.fail().await
    }
}

/// In-memory store with switchable faults on reads and commits.
///
/// With `hold_ranking` set, `top_ranked` takes its snapshot, signals
/// `ranking_taken` and waits on `ranking_release` before returning it.
/// With `hang_commits` set, a commit lands and then never answers.
pub struct FlakyStore {
    pub inner: InMemoryCombatantStore,
    pub hang_reads: AtomicBool,
    pub fail_commits: AtomicBool,
    pub hang_commits: AtomicBool,
    pub hold_ranking: AtomicBool,
    pub ranking_taken: Notify,
    pub ranking_release: Notify,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryCombatantStore::with_roster(roster()),
            hang_reads: AtomicBool::new(false),
            fail_commits: AtomicBool::new(false),
            hang_commits: AtomicBool::new(false),
            hold_ranking: AtomicBool::new(false),
            ranking_taken: Notify::new(),
            ranking_release: Notify::new(),
        }
    }

    async fn gate_read(&self) {
        if self.hang_reads.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    }
}

#[async_trait]
impl CombatantStore for FlakyStore {
    async fn get_combatant(&self, id: CombatantId) -> repository::Result<Option<Combatant>> {
        self.gate_read().await;
        self.inner.get_combatant(id).await
    }

    async fn insert_battle_record(&self, record: NewBattleRecord) -> repository::Result<BattleId> {
        self.inner.insert_battle_record(record).await
    }

    async fn update_combatant_stats(
        &self,
        id: CombatantId,
        delta: StatsDelta,
    ) -> repository::Result<()> {
        self.inner.update_combatant_stats(id, delta).await
    }

    async fn commit_battle(&self, commit: BattleCommit) -> repository::Result<BattleRecord> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("transaction aborted".to_string()));
        }
        let record = self.inner.commit_battle(commit).await?;
        if self.hang_commits.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        Ok(record)
    }

    async fn top_ranked(&self, limit: usize) -> repository::Result<Vec<RankingEntry>> {
        self.gate_read().await;
        let snapshot = self.inner.top_ranked(limit).await?;
        if self.hold_ranking.load(Ordering::SeqCst) {
            self.ranking_taken.notify_one();
            self.ranking_release.notified().await;
        }
        Ok(snapshot)
    }

    async fn list_combatants(&self) -> repository::Result<Vec<Combatant>> {
        self.inner.list_combatants().await
    }

    async fn recent_battles(&self, limit: usize) -> repository::Result<Vec<BattleSummary>> {
        self.inner.recent_battles(limit).await
    }

    async fn totals(&self) -> repository::Result<ArenaTotals> {
        self.inner.totals().await
    }

    async fn seed_combatants(
        &self,
        roster: Vec<CombatantSpec>,
    ) -> repository::Result<Vec<Combatant>> {
        self.inner.seed_combatants(roster).await
    }
}
