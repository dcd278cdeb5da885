//! In-memory repository implementations for testing and development.

mod combatant;

pub use combatant::InMemoryCombatantStore;
