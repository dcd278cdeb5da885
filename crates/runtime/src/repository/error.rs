//! Error types raised by combatant store implementations.

use arena_core::CombatantId;
use thiserror::Error;

/// Errors surfaced by [`CombatantStore`](super::CombatantStore) implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("combatant {0} not found")]
    CombatantNotFound(CombatantId),

    #[error("battle must reference two distinct combatants, got {0} twice")]
    SameCombatant(CombatantId),

    #[error("stat delta for {0} does not belong to the battle being committed")]
    ForeignDelta(CombatantId),

    #[error("store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
