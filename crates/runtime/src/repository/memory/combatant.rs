//! In-memory CombatantStore implementation for tests and local runs.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use arena_core::{
    BattleId, BattleRecord, BattleSummary, Combatant, CombatantId, CombatantSpec, NewBattleRecord,
    RankingEntry, StatsDelta,
};

use crate::repository::{
    ArenaLedger, ArenaTotals, BattleCommit, CombatantStore, RepositoryError, Result,
};

/// In-memory implementation of CombatantStore.
///
/// A single write lock around the ledger makes `commit_battle` atomic.
pub struct InMemoryCombatantStore {
    ledger: RwLock<ArenaLedger>,
}

impl InMemoryCombatantStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            ledger: RwLock::new(ArenaLedger::new()),
        }
    }

    /// Create a store pre-populated with a roster.
    pub fn with_roster(roster: Vec<CombatantSpec>) -> Self {
        let mut ledger = ArenaLedger::new();
        ledger.seed(roster);
        Self {
            ledger: RwLock::new(ledger),
        }
    }

    /// Number of battle records written so far.
    pub fn battle_count(&self) -> Result<usize> {
        self.read(|ledger| ledger.battles().len())
    }

    fn read<T>(&self, f: impl FnOnce(&ArenaLedger) -> T) -> Result<T> {
        let ledger = self
            .ledger
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(f(&ledger))
    }

    fn write<T>(&self, f: impl FnOnce(&mut ArenaLedger) -> Result<T>) -> Result<T> {
        let mut ledger = self
            .ledger
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        f(&mut ledger)
    }
}

impl Default for InMemoryCombatantStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CombatantStore for InMemoryCombatantStore {
    async fn get_combatant(&self, id: CombatantId) -> Result<Option<Combatant>> {
        self.read(|ledger| ledger.combatant(id).cloned())
    }

    async fn insert_battle_record(&self, record: NewBattleRecord) -> Result<BattleId> {
        self.write(|ledger| {
            ledger
                .insert_battle_record(record, Utc::now())
                .map(|saved| saved.id)
        })
    }

    async fn update_combatant_stats(&self, id: CombatantId, delta: StatsDelta) -> Result<()> {
        self.write(|ledger| ledger.apply_delta(id, &delta))
    }

    async fn commit_battle(&self, commit: BattleCommit) -> Result<BattleRecord> {
        self.write(|ledger| ledger.commit(commit, Utc::now()))
    }

    async fn top_ranked(&self, limit: usize) -> Result<Vec<RankingEntry>> {
        self.read(|ledger| ledger.top_ranked(limit))
    }

    async fn list_combatants(&self) -> Result<Vec<Combatant>> {
        self.read(ArenaLedger::list_combatants)
    }

    async fn recent_battles(&self, limit: usize) -> Result<Vec<BattleSummary>> {
        self.read(|ledger| ledger.recent_battles(limit))
    }

    async fn totals(&self) -> Result<ArenaTotals> {
        self.read(ArenaLedger::totals)
    }

    async fn seed_combatants(&self, roster: Vec<CombatantSpec>) -> Result<Vec<Combatant>> {
        self.write(|ledger| Ok(ledger.seed(roster)))
    }
}
