use std::fmt;

use thiserror::Error;

use super::ranking::{RankingEntry, ranking_points, win_rate};

/// Unique, immutable identifier of a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CombatantId(pub u64);

impl CombatantId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for CombatantId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A battle-capable entity and its cumulative record.
///
/// `health_points` is the maximum HP and the starting HP of every simulation.
/// Current HP is never persisted: each battle starts fresh.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub class: String,
    pub level: u32,
    pub attack_power: u32,
    pub defense_power: u32,
    pub health_points: u32,

    // Cumulative outcome statistics
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub total_damage_dealt: u64,
    pub total_damage_received: u64,
}

impl Combatant {
    /// Creates a fresh combatant with zeroed statistics.
    pub fn from_spec(id: CombatantId, spec: CombatantSpec) -> Self {
        Self {
            id,
            name: spec.name,
            class: spec.class,
            level: spec.level,
            attack_power: spec.attack_power,
            defense_power: spec.defense_power,
            health_points: spec.health_points,
            wins: 0,
            losses: 0,
            draws: 0,
            total_damage_dealt: 0,
            total_damage_received: 0,
        }
    }

    /// Number of battles this combatant has taken part in.
    pub fn battles_fought(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// A combatant without health cannot enter the simulation.
    pub fn can_fight(&self) -> bool {
        self.health_points > 0
    }

    pub fn ranking_points(&self) -> u32 {
        ranking_points(self.wins, self.draws)
    }

    /// Projects this combatant onto a leaderboard row.
    pub fn ranking_entry(&self) -> RankingEntry {
        RankingEntry {
            name: self.name.clone(),
            class: self.class.clone(),
            level: self.level,
            wins: self.wins,
            losses: self.losses,
            draws: self.draws,
            win_rate: win_rate(self.wins, self.losses, self.draws),
            ranking_points: self.ranking_points(),
        }
    }

    /// Applies a post-battle delta as increments.
    pub fn apply(&mut self, delta: &StatsDelta) {
        self.wins = self.wins.saturating_add(delta.wins);
        self.losses = self.losses.saturating_add(delta.losses);
        self.draws = self.draws.saturating_add(delta.draws);
        self.total_damage_dealt = self.total_damage_dealt.saturating_add(delta.damage_dealt);
        self.total_damage_received = self
            .total_damage_received
            .saturating_add(delta.damage_received);
    }
}

/// Attributes needed to enrol a new combatant (roster entries).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSpec {
    pub name: String,
    pub class: String,
    #[cfg_attr(feature = "serde", serde(default = "default_level"))]
    pub level: u32,
    pub attack_power: u32,
    pub defense_power: u32,
    pub health_points: u32,
}

#[cfg(feature = "serde")]
fn default_level() -> u32 {
    1
}

/// Reasons a roster entry is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("combatant name must not be empty")]
    EmptyName,

    #[error("combatant {name:?} must have positive health points")]
    NoHealth { name: String },
}

impl CombatantSpec {
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.name.trim().is_empty() {
            return Err(SpecError::EmptyName);
        }
        if self.health_points == 0 {
            return Err(SpecError::NoHealth {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// Increment applied to one combatant after a battle.
///
/// Exactly one of `wins`, `losses`, `draws` is 1 for a delta produced by a
/// battle; the store applies it as an atomic increment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsDelta {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub damage_dealt: u64,
    pub damage_received: u64,
}

impl StatsDelta {
    pub const fn win(damage_dealt: u64, damage_received: u64) -> Self {
        Self {
            wins: 1,
            losses: 0,
            draws: 0,
            damage_dealt,
            damage_received,
        }
    }

    pub const fn loss(damage_dealt: u64, damage_received: u64) -> Self {
        Self {
            wins: 0,
            losses: 1,
            draws: 0,
            damage_dealt,
            damage_received,
        }
    }

    /// Draws record no damage.
    pub const fn draw() -> Self {
        Self {
            wins: 0,
            losses: 0,
            draws: 1,
            damage_dealt: 0,
            damage_received: 0,
        }
    }

    pub const fn outcomes(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}
