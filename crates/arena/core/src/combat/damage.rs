//! Damage calculation and application.

use crate::config::BattleRules;

/// Calculate damage from one attack.
///
/// # Formula
///
/// ```text
/// raw    = attack - defense / defense_divisor + jitter
/// damage = max(0, raw)
/// ```
///
/// `raw` may be negative (a strong defender); the clamp keeps recorded damage
/// non-negative.
pub fn calculate_damage(attack: u32, defense: u32, jitter: i32, rules: &BattleRules) -> u32 {
    let raw = i64::from(attack) - i64::from(defense) / rules.defense_divisor + i64::from(jitter);
    u32::try_from(raw.max(0)).unwrap_or(u32::MAX)
}

/// Apply damage to a running HP value.
///
/// HP is signed during the simulation so that the verdict can compare
/// overkill; displays clamp it at zero.
pub fn apply_damage(current_hp: i64, damage: u32) -> i64 {
    current_hp - i64::from(damage)
}
