//! Unified error type surfaced by the arena runtime.
//!
//! Wraps failures from the store, the cache, and request validation so callers
//! can map every failure onto an [`ErrorKind`] with consistent context.
use std::time::Duration;

use thiserror::Error;

use arena_core::{CombatantId, ErrorKind, SpecError};

pub use crate::cache::CacheError;
pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, ArenaError>;

/// External collaborator a failed call was addressed to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Component {
    Store,
    Cache,
}

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("a combatant cannot battle itself ({0})")]
    SelfBattle(CombatantId),

    #[error("combatant {0} has no health points and cannot battle")]
    NoHealth(CombatantId),

    #[error("combatant {0} not found")]
    NotFound(CombatantId),

    #[error("invalid roster entry: {0}")]
    InvalidSpec(#[from] SpecError),

    /// A commit carried stats for a combatant outside its battle. Retrying the
    /// same commit fails the same way.
    #[error("battle commit rejected: stats for {0} do not belong to the battle")]
    RejectedCommit(CombatantId),

    #[error("store unavailable: {0}")]
    Store(#[source] RepositoryError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("{component} call `{operation}` timed out after {after:?}")]
    Timeout {
        component: Component,
        operation: &'static str,
        after: Duration,
    },
}

impl ArenaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SelfBattle(_)
            | Self::NoHealth(_)
            | Self::InvalidSpec(_)
            | Self::RejectedCommit(_) => ErrorKind::InvalidInput,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Store(_) | Self::Cache(_) | Self::Timeout { .. } => ErrorKind::Unavailable,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }
}

impl From<RepositoryError> for ArenaError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::CombatantNotFound(id) => Self::NotFound(id),
            RepositoryError::SameCombatant(id) => Self::SelfBattle(id),
            RepositoryError::ForeignDelta(id) => Self::RejectedCommit(id),
            other => Self::Store(other),
        }
    }
}
