//! Shared types for the repository layer.

use arena_core::{BattleOutcome, CombatantId, MostVictorious, NewBattleRecord, StatsDelta};
use serde::{Deserialize, Serialize};

/// Everything one battle writes, committed as a single transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleCommit {
    pub record: NewBattleRecord,
    pub deltas: [(CombatantId, StatsDelta); 2],
}

impl BattleCommit {
    pub fn from_outcome(outcome: &BattleOutcome, seed: u64) -> Self {
        Self {
            record: NewBattleRecord::from_outcome(outcome, seed),
            deltas: outcome.stat_deltas(),
        }
    }
}

/// Arena-wide counts read straight from the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaTotals {
    pub total_combatants: usize,
    pub total_battles: usize,
    pub most_victorious: Option<MostVictorious>,
}
