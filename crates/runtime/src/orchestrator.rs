//! Resolves one battle end to end.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use arena_core::{BattleRecord, Combatant, CombatantId, PcgJitter, Verdict, simulate};

use crate::api::{ArenaError, Component, Result};
use crate::config::ArenaConfig;
use crate::counters::ArenaCounters;
use crate::deadline::bounded;
use crate::ranking::RankingService;
use crate::repository::{BattleCommit, CombatantStore};
use crate::seeds::SeedSource;

/// Loads both combatants, runs the engine and commits the result.
///
/// Store writes happen in a single `commit_battle` call. The ranking cache is
/// invalidated after that call succeeds, and also after it times out, since a
/// timed-out commit may still land.
#[derive(Clone)]
pub struct BattleOrchestrator {
    store: Arc<dyn CombatantStore>,
    ranking: RankingService,
    seeds: Arc<dyn SeedSource>,
    counters: Arc<ArenaCounters>,
    config: ArenaConfig,
}

impl BattleOrchestrator {
    pub fn new(
        store: Arc<dyn CombatantStore>,
        ranking: RankingService,
        seeds: Arc<dyn SeedSource>,
        counters: Arc<ArenaCounters>,
        config: ArenaConfig,
    ) -> Self {
        Self {
            store,
            ranking,
            seeds,
            counters,
            config,
        }
    }

    #[instrument(skip_all, fields(hero1 = %hero1_id, hero2 = %hero2_id))]
    pub async fn resolve_battle(
        &self,
        hero1_id: CombatantId,
        hero2_id: CombatantId,
    ) -> Result<BattleRecord> {
        if hero1_id == hero2_id {
            return Err(ArenaError::SelfBattle(hero1_id));
        }

        let hero1 = self.fetch(hero1_id).await?;
        let hero2 = self.fetch(hero2_id).await?;
        for combatant in [&hero1, &hero2] {
            if !combatant.can_fight() {
                return Err(ArenaError::NoHealth(combatant.id));
            }
        }

        let seed = self.seeds.next_seed();
        let mut jitter = PcgJitter::from_seed(seed);
        let outcome = simulate(&hero1, &hero2, &self.config.rules, &mut jitter);

        let committed = bounded(
            Component::Store,
            "commit_battle",
            self.config.store_timeout,
            self.store.commit_battle(BattleCommit::from_outcome(&outcome, seed)),
        )
        .await;
        let record = match committed {
            Ok(record) => record,
            Err(timeout @ ArenaError::Timeout { .. }) => {
                warn!(seed, "battle commit timed out, outcome unknown");
                if let Err(err) = self.ranking.invalidate().await {
                    error!(%err, "failed to invalidate ranking cache");
                }
                return Err(timeout);
            }
            Err(err) => return Err(err),
        };

        // The battle is durable from here on; a stale cache expires with its TTL.
        if let Err(err) = self.ranking.invalidate().await {
            error!(battle = %record.id, %err, "failed to invalidate ranking cache");
        }
        self.counters.record_battle();

        match outcome.verdict() {
            Verdict::Win { winner, loser } => info!(
                battle = %record.id,
                %winner,
                %loser,
                rounds = record.rounds,
                seed,
                "battle resolved"
            ),
            Verdict::Draw { .. } => info!(
                battle = %record.id,
                rounds = record.rounds,
                seed,
                "battle resolved as a draw"
            ),
        }

        Ok(record)
    }

    async fn fetch(&self, id: CombatantId) -> Result<Combatant> {
        bounded(
            Component::Store,
            "get_combatant",
            self.config.store_timeout,
            self.store.get_combatant(id),
        )
        .await?
        .ok_or(ArenaError::NotFound(id))
    }
}
