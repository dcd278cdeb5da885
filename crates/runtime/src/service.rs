//! Service facade wiring the store, cache, orchestrator and ranking together.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument, warn};

use arena_core::{
    BattleRecord, BattleSummary, Combatant, CombatantId, CombatantSpec, MostVictorious,
};

use crate::api::{ArenaError, Component, Result};
use crate::cache::{InMemoryRankingCache, RankingCache};
use crate::config::ArenaConfig;
use crate::counters::{ArenaCounters, CountersSnapshot};
use crate::deadline::bounded;
use crate::orchestrator::BattleOrchestrator;
use crate::ranking::{RankingService, RankingView};
use crate::repository::CombatantStore;
use crate::seeds::{RandomSeeds, SeedSource, SequentialSeeds};

/// Arena-wide figures combining store totals with this session's counters.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArenaStats {
    pub total_combatants: usize,
    pub total_battles: usize,
    pub most_victorious: Option<MostVictorious>,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub battles_this_session: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComponentHealth {
    Healthy,
    Unhealthy { reason: String },
}

impl ComponentHealth {
    fn from_probe(probe: Result<()>) -> Self {
        match probe {
            Ok(()) => Self::Healthy,
            Err(err) => Self::Unhealthy {
                reason: err.to_string(),
            },
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HealthReport {
    pub store: ComponentHealth,
    pub cache: ComponentHealth,
    pub checked_at: DateTime<Utc>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.store.is_healthy() && self.cache.is_healthy()
    }

    pub fn status_code(&self) -> u16 {
        if self.is_healthy() { 200 } else { 503 }
    }
}

/// Cloneable handle over one arena: every clone shares the same store, cache
/// and counters.
#[derive(Clone)]
pub struct ArenaService {
    store: Arc<dyn CombatantStore>,
    cache: Arc<dyn RankingCache>,
    orchestrator: BattleOrchestrator,
    ranking: RankingService,
    counters: Arc<ArenaCounters>,
    config: ArenaConfig,
}

impl ArenaService {
    /// Start building a service around `store`.
    pub fn builder(store: Arc<dyn CombatantStore>) -> ArenaServiceBuilder {
        ArenaServiceBuilder::new(store)
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn counters(&self) -> CountersSnapshot {
        self.counters.snapshot()
    }

    pub async fn resolve_battle(
        &self,
        hero1_id: CombatantId,
        hero2_id: CombatantId,
    ) -> Result<BattleRecord> {
        self.orchestrator.resolve_battle(hero1_id, hero2_id).await
    }

    pub async fn get_ranking(&self) -> Result<RankingView> {
        self.ranking.get_ranking().await
    }

    pub async fn combatant(&self, id: CombatantId) -> Result<Combatant> {
        bounded(
            Component::Store,
            "get_combatant",
            self.config.store_timeout,
            self.store.get_combatant(id),
        )
        .await?
        .ok_or(ArenaError::NotFound(id))
    }

    pub async fn list_combatants(&self) -> Result<Vec<Combatant>> {
        bounded(
            Component::Store,
            "list_combatants",
            self.config.store_timeout,
            self.store.list_combatants(),
        )
        .await
    }

    /// Newest battles first; `None` uses the configured default length.
    pub async fn recent_battles(&self, limit: Option<usize>) -> Result<Vec<BattleSummary>> {
        let limit = limit.unwrap_or(self.config.recent_battles_limit);
        bounded(
            Component::Store,
            "recent_battles",
            self.config.store_timeout,
            self.store.recent_battles(limit),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<ArenaStats> {
        let totals = bounded(
            Component::Store,
            "totals",
            self.config.store_timeout,
            self.store.totals(),
        )
        .await?;
        let counters = self.counters.snapshot();

        Ok(ArenaStats {
            total_combatants: totals.total_combatants,
            total_battles: totals.total_battles,
            most_victorious: totals.most_victorious,
            cache_hits: counters.cache_hits,
            cache_misses: counters.cache_misses,
            battles_this_session: counters.battles,
        })
    }

    #[instrument(skip(self))]
    pub async fn health(&self) -> HealthReport {
        let store = bounded(
            Component::Store,
            "ping",
            self.config.store_timeout,
            self.store.ping(),
        )
        .await;
        let cache = bounded(
            Component::Cache,
            "ping",
            self.config.cache_timeout,
            self.cache.ping(),
        )
        .await;

        let report = HealthReport {
            store: ComponentHealth::from_probe(store),
            cache: ComponentHealth::from_probe(cache),
            checked_at: Utc::now(),
        };
        if !report.is_healthy() {
            warn!(store = ?report.store, cache = ?report.cache, "arena unhealthy");
        }
        report
    }

    /// Validates and enrols roster entries whose names are new.
    #[instrument(skip(self, roster), fields(entries = roster.len()))]
    pub async fn seed_roster(&self, roster: Vec<CombatantSpec>) -> Result<Vec<Combatant>> {
        for spec in &roster {
            spec.validate()?;
        }

        let created = bounded(
            Component::Store,
            "seed_combatants",
            self.config.store_timeout,
            self.store.seed_combatants(roster),
        )
        .await?;

        if !created.is_empty() {
            info!(created = created.len(), "roster seeded");
            if let Err(err) = self.ranking.invalidate().await {
                warn!(%err, "failed to invalidate ranking cache after seeding");
            }
        }
        Ok(created)
    }
}

/// Builder for [`ArenaService`].
///
/// The store is mandatory. The cache defaults to an [`InMemoryRankingCache`]
/// and the seed source follows `config.battle_seed`.
pub struct ArenaServiceBuilder {
    store: Arc<dyn CombatantStore>,
    cache: Option<Arc<dyn RankingCache>>,
    seeds: Option<Arc<dyn SeedSource>>,
    config: ArenaConfig,
}

impl ArenaServiceBuilder {
    fn new(store: Arc<dyn CombatantStore>) -> Self {
        Self {
            store,
            cache: None,
            seeds: None,
            config: ArenaConfig::default(),
        }
    }

    pub fn config(mut self, config: ArenaConfig) -> Self {
        self.config = config;
        self
    }

    pub fn cache(mut self, cache: Arc<dyn RankingCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Override where battle seeds come from.
    pub fn seeds(mut self, seeds: Arc<dyn SeedSource>) -> Self {
        self.seeds = Some(seeds);
        self
    }

    pub fn build(self) -> ArenaService {
        let config = self.config;
        let cache: Arc<dyn RankingCache> = match self.cache {
            Some(cache) => cache,
            None => Arc::new(InMemoryRankingCache::new()),
        };
        let seeds: Arc<dyn SeedSource> = match (self.seeds, config.battle_seed) {
            (Some(seeds), _) => seeds,
            (None, Some(seed)) => Arc::new(SequentialSeeds::starting_at(seed)),
            (None, None) => Arc::new(RandomSeeds),
        };
        let counters = Arc::new(ArenaCounters::new());

        let ranking = RankingService::new(
            self.store.clone(),
            cache.clone(),
            counters.clone(),
            config.clone(),
        );
        let orchestrator = BattleOrchestrator::new(
            self.store.clone(),
            ranking.clone(),
            seeds,
            counters.clone(),
            config.clone(),
        );

        ArenaService {
            store: self.store,
            cache,
            orchestrator,
            ranking,
            counters,
            config,
        }
    }
}
