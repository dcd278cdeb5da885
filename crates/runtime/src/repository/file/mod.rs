//! File-based repository implementations.

mod combatant;

pub use combatant::FileCombatantStore;
