//! Deterministic arena rules and data types shared across the service.
//!
//! `arena-core` defines the canonical combat rules (damage formula, turn order,
//! round cap, verdict) and the records they produce. Everything here is pure:
//! randomness enters only through a [`JitterSource`], so a battle can be
//! replayed exactly from its two combatant snapshots and the recorded seed.
//!
//! The runtime crate layers persistence, caching, and orchestration on top of
//! the types re-exported here.
pub mod combat;
pub mod config;
pub mod error;
pub mod state;

pub use combat::{
    AttackEntry, BattleLog, BattleOutcome, FixedJitter, JitterSource, LogEntry, PcgJitter,
    Verdict, apply_damage, calculate_damage, simulate,
};
pub use config::BattleRules;
pub use error::ErrorKind;
pub use state::{
    BattleId, BattleRecord, BattleSummary, Combatant, CombatantId, CombatantSpec, MostVictorious,
    NewBattleRecord, RankingEntry, SpecError, StatsDelta, compare_rank, ranking_points, win_rate,
};
