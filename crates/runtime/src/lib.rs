//! Runtime for the arena: persistence, caching and battle orchestration.
//!
//! This crate wires the pure battle engine from `arena-core` to a durable
//! combatant store and a disposable ranking cache. Consumers build an
//! [`ArenaService`] and call it directly, or go through the transport-agnostic
//! handlers in [`api`].
//!
//! Modules are organized by responsibility:
//! - [`orchestrator`] resolves a battle and commits its result
//! - [`ranking`] serves the leaderboard through a read-through cache
//! - [`service`] is the facade and builder that owns shared state
//! - [`api`] exposes the error taxonomy and the request/response contract
//! - [`repository`] and [`cache`] define the external ports and their adapters
pub mod api;
pub mod cache;
pub mod config;
pub mod counters;
pub mod orchestrator;
pub mod ranking;
pub mod repository;
pub mod seeds;
pub mod service;

mod deadline;

pub use api::{ArenaError, Component, Result};
pub use cache::{CacheError, InMemoryRankingCache, RankingCache};
pub use config::ArenaConfig;
pub use counters::{ArenaCounters, CountersSnapshot};
pub use orchestrator::BattleOrchestrator;
pub use ranking::{
    CachedRanking, RANKING_KEY, RANKING_TTL, RankingService, RankingSource, RankingView,
};
pub use repository::{
    ArenaLedger, ArenaTotals, BattleCommit, CombatantStore, FileCombatantStore,
    InMemoryCombatantStore, RepositoryError,
};
pub use seeds::{RandomSeeds, SeedSource, SequentialSeeds};
pub use service::{ArenaService, ArenaServiceBuilder, ArenaStats, ComponentHealth, HealthReport};
