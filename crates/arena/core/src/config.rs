/// Combat constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRules {
    /// Hard cap on rounds. Reaching it ends the fight but does not force a draw.
    pub max_rounds: u32,
    /// Inclusive lower bound of the per-attack jitter.
    pub jitter_min: i32,
    /// Inclusive upper bound of the per-attack jitter.
    pub jitter_max: i32,
    /// Defense is divided by this before being subtracted from attack.
    pub defense_divisor: i64,
}

impl BattleRules {
    // ===== canonical values =====
    pub const MAX_ROUNDS: u32 = 20;
    pub const JITTER_MIN: i32 = -10;
    pub const JITTER_MAX: i32 = 10;
    pub const DEFENSE_DIVISOR: i64 = 2;

    pub const fn new() -> Self {
        Self {
            max_rounds: Self::MAX_ROUNDS,
            jitter_min: Self::JITTER_MIN,
            jitter_max: Self::JITTER_MAX,
            defense_divisor: Self::DEFENSE_DIVISOR,
        }
    }
}

impl Default for BattleRules {
    fn default() -> Self {
        Self::new()
    }
}
