//! Leaderboard projection.
//!
//! The ranking is derived, never stored: every entry is computed from a
//! [`Combatant`] on demand. Points reward wins three times as much as draws;
//! losses cost nothing but lower the win rate.

use std::cmp::Ordering;

use super::combatant::Combatant;

const POINTS_PER_WIN: u32 = 3;
const POINTS_PER_DRAW: u32 = 1;

/// One leaderboard row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankingEntry {
    pub name: String,
    pub class: String,
    pub level: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Percentage of battles won, rounded to two decimals.
    pub win_rate: f64,
    pub ranking_points: u32,
}

/// The combatant with the most wins, if anyone has won at all.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MostVictorious {
    pub name: String,
    pub wins: u32,
}

pub fn ranking_points(wins: u32, draws: u32) -> u32 {
    wins.saturating_mul(POINTS_PER_WIN)
        .saturating_add(draws.saturating_mul(POINTS_PER_DRAW))
}

/// Win percentage in `[0, 100]`; zero when no battle has been fought.
pub fn win_rate(wins: u32, losses: u32, draws: u32) -> f64 {
    let total = u64::from(wins) + u64::from(losses) + u64::from(draws);
    if total == 0 {
        return 0.0;
    }
    let rate = f64::from(wins) * 100.0 / total as f64;
    (rate * 100.0).round() / 100.0
}

/// Leaderboard order: points desc, then level desc, then id asc.
pub fn compare_rank(a: &Combatant, b: &Combatant) -> Ordering {
    b.ranking_points()
        .cmp(&a.ranking_points())
        .then_with(|| b.level.cmp(&a.level))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CombatantId, CombatantSpec};

    fn combatant(id: u64, level: u32, wins: u32, draws: u32) -> Combatant {
        let mut c = Combatant::from_spec(
            CombatantId(id),
            CombatantSpec {
                name: format!("c{id}"),
                class: "Mage".into(),
                level,
                attack_power: 10,
                defense_power: 10,
                health_points: 10,
            },
        );
        c.wins = wins;
        c.draws = draws;
        c
    }

    #[test]
    fn test_points_weight_wins_over_draws() {
        assert_eq!(ranking_points(0, 0), 0);
        assert_eq!(ranking_points(2, 1), 7);
        assert_eq!(ranking_points(u32::MAX, 1), u32::MAX);
    }

    #[test]
    fn test_win_rate_rounding_and_empty_record() {
        assert_eq!(win_rate(0, 0, 0), 0.0);
        assert_eq!(win_rate(1, 1, 0), 50.0);
        assert_eq!(win_rate(1, 2, 0), 33.33);
        assert_eq!(win_rate(2, 1, 0), 66.67);
    }

    #[test]
    fn test_compare_rank_breaks_ties_by_level_then_id() {
        let mut roster = vec![
            combatant(3, 5, 1, 0),
            combatant(1, 5, 1, 0),
            combatant(2, 9, 1, 0),
            combatant(4, 1, 2, 0),
        ];
        roster.sort_by(compare_rank);
        let order: Vec<u64> = roster.iter().map(|c| c.id.0).collect();
        assert_eq!(order, vec![4, 2, 1, 3]);
    }
}
