use std::fmt;

use chrono::{DateTime, Utc};

use super::combatant::CombatantId;
use crate::combat::BattleOutcome;

/// Store-assigned, strictly increasing battle identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BattleId(pub u64);

impl BattleId {
    pub const FIRST: Self = Self(1);

    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for BattleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Battle result awaiting an identifier from the store.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewBattleRecord {
    pub hero1_id: CombatantId,
    pub hero2_id: CombatantId,
    /// `None` encodes a draw.
    pub winner_id: Option<CombatantId>,
    pub hero1_damage_dealt: u64,
    pub hero2_damage_dealt: u64,
    pub rounds: u32,
    pub battle_log: String,
    /// Jitter seed; replays the battle together with both snapshots.
    pub seed: u64,
}

impl NewBattleRecord {
    pub fn from_outcome(outcome: &BattleOutcome, seed: u64) -> Self {
        Self {
            hero1_id: outcome.hero1_id,
            hero2_id: outcome.hero2_id,
            winner_id: outcome.winner_id,
            hero1_damage_dealt: outcome.hero1_damage,
            hero2_damage_dealt: outcome.hero2_damage,
            rounds: outcome.rounds,
            battle_log: outcome.log.render(),
            seed,
        }
    }

    pub fn involves(&self, id: CombatantId) -> bool {
        self.hero1_id == id || self.hero2_id == id
    }

    pub fn into_record(self, id: BattleId, created_at: DateTime<Utc>) -> BattleRecord {
        BattleRecord {
            id,
            hero1_id: self.hero1_id,
            hero2_id: self.hero2_id,
            winner_id: self.winner_id,
            hero1_damage_dealt: self.hero1_damage_dealt,
            hero2_damage_dealt: self.hero2_damage_dealt,
            rounds: self.rounds,
            battle_log: self.battle_log,
            seed: self.seed,
            created_at,
        }
    }
}

/// Immutable, append-only record of one resolved battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRecord {
    pub id: BattleId,
    pub hero1_id: CombatantId,
    pub hero2_id: CombatantId,
    pub winner_id: Option<CombatantId>,
    pub hero1_damage_dealt: u64,
    pub hero2_damage_dealt: u64,
    pub rounds: u32,
    pub battle_log: String,
    pub seed: u64,
    pub created_at: DateTime<Utc>,
}

impl BattleRecord {
    pub fn involves(&self, id: CombatantId) -> bool {
        self.hero1_id == id || self.hero2_id == id
    }

    pub fn is_draw(&self) -> bool {
        self.winner_id.is_none()
    }
}

/// Battle history row joined with participant names.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSummary {
    pub id: BattleId,
    pub rounds: u32,
    pub created_at: DateTime<Utc>,
    pub hero1_name: String,
    pub hero2_name: String,
    pub winner_name: Option<String>,
    pub hero1_damage_dealt: u64,
    pub hero2_damage_dealt: u64,
}
