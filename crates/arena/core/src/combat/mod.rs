//! Combat resolution system.
//!
//! This module provides pure functions for resolving a battle between two
//! combatants. All combat logic is deterministic given a [`JitterSource`].
//!
//! # Core Functions
//!
//! - `simulate`: Full round-based battle (turn order, round cap, verdict)
//! - `calculate_damage`: Attack vs halved defense plus jitter, clamped at zero
//! - `apply_damage`: HP reduction (may go negative; display clamps)

pub mod damage;
pub mod engine;
pub mod jitter;
pub mod log;

pub use damage::{apply_damage, calculate_damage};
pub use engine::{BattleOutcome, Verdict, simulate};
pub use jitter::{FixedJitter, JitterSource, PcgJitter};
pub use log::{AttackEntry, BattleLog, LogEntry};
