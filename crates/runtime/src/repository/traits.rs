//! Store contract consumed by the orchestrator and ranking service.

use async_trait::async_trait;

use arena_core::{
    BattleId, BattleRecord, BattleSummary, Combatant, CombatantId, CombatantSpec, NewBattleRecord,
    RankingEntry, StatsDelta,
};

use super::error::Result;
use super::types::{ArenaTotals, BattleCommit};

/// Durable storage for combatants and battle history.
///
/// Every call is blocking I/O from the caller's point of view; the runtime
/// wraps each one in a timeout.
///
/// # Consistency
///
/// - `commit_battle` is all-or-nothing: the record and both stat deltas land
///   together or not at all
/// - Stat deltas are applied as increments inside the store, never as a
///   read-modify-write by the caller
#[async_trait]
pub trait CombatantStore: Send + Sync {
    /// Fetch a combatant snapshot, `None` if the id is unknown.
    async fn get_combatant(&self, id: CombatantId) -> Result<Option<Combatant>>;

    /// Append a battle record and return its store-assigned id.
    async fn insert_battle_record(&self, record: NewBattleRecord) -> Result<BattleId>;

    /// Increment one combatant's statistics.
    ///
    /// Fails with `CombatantNotFound` if the id is unknown.
    async fn update_combatant_stats(&self, id: CombatantId, delta: StatsDelta) -> Result<()>;

    /// Insert the record and apply both deltas in one transaction.
    async fn commit_battle(&self, commit: BattleCommit) -> Result<BattleRecord>;

    /// Top `limit` combatants in leaderboard order.
    async fn top_ranked(&self, limit: usize) -> Result<Vec<RankingEntry>>;

    /// Every combatant in leaderboard order.
    async fn list_combatants(&self) -> Result<Vec<Combatant>>;

    /// Newest battles first, joined with participant names.
    async fn recent_battles(&self, limit: usize) -> Result<Vec<BattleSummary>>;

    async fn totals(&self) -> Result<ArenaTotals>;

    /// Enrol roster entries whose names are not taken yet.
    ///
    /// Returns the combatants created by this call.
    async fn seed_combatants(&self, roster: Vec<CombatantSpec>) -> Result<Vec<Combatant>>;

    /// Liveness probe for health checks.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
