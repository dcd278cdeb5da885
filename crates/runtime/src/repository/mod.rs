//! Repository layer for durable arena data.
//!
//! The combatant store is the single source of truth: combatant records,
//! cumulative statistics, and the append-only battle history. Everything the
//! cache holds is derived from it.
//!
//! - [`InMemoryCombatantStore`] for tests and ephemeral runs
//! - [`FileCombatantStore`] persists the same ledger as one JSON document

mod error;
mod file;
mod ledger;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::FileCombatantStore;
pub use ledger::ArenaLedger;
pub use memory::InMemoryCombatantStore;
pub use traits::CombatantStore;
pub use types::{ArenaTotals, BattleCommit};
