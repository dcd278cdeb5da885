//! Persistent arena records: combatants, battles, and ranking projections.
//!
//! These types are what the store keeps and what the API returns. None of them
//! carry behaviour that touches I/O; mutation of a [`Combatant`] happens only
//! through [`StatsDelta`] after a battle has been resolved.

mod battle;
mod combatant;
mod ranking;

pub use battle::{BattleId, BattleRecord, BattleSummary, NewBattleRecord};
pub use combatant::{Combatant, CombatantId, CombatantSpec, SpecError, StatsDelta};
pub use ranking::{MostVictorious, RankingEntry, compare_rank, ranking_points, win_rate};
