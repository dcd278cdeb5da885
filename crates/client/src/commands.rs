//! `arena` subcommands.
//!
//! Every command produces an [`ApiResponse`] so the CLI prints the same JSON
//! body an HTTP layer would send.

use anyhow::Result;
use clap::Parser;
use rand::seq::SliceRandom;
use serde::Serialize;

use arena_core::CombatantId;
use arena_runtime::api::handlers;
use arena_runtime::api::{
    ApiResponse, ArenaError, BattleResponse, CreateBattleRequest, RankingResponse,
};
use arena_runtime::ArenaService;

/// Combat arena with a cached leaderboard
#[derive(Parser)]
#[command(name = "arena")]
#[command(about = "Resolve battles and inspect the leaderboard", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Resolve a battle between two combatants (first id attacks first)
    Battle {
        #[arg(value_name = "HERO1")]
        hero1: u64,
        #[arg(value_name = "HERO2")]
        hero2: u64,
    },

    /// Show the leaderboard and where it was served from
    Ranking,

    /// List every combatant in leaderboard order
    Heroes,

    /// Show the most recent battles
    Battles {
        /// Number of battles to show (defaults to ARENA_RECENT_BATTLES)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Arena totals and session counters
    Stats,

    /// Probe store and cache
    Health,

    /// Run random bouts, then read the leaderboard twice
    Tournament {
        /// Number of bouts
        #[arg(short, long, default_value_t = 8)]
        bouts: usize,
    },
}

/// Rendered command result.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub status: u16,
    pub body: serde_json::Value,
}

impl Outcome {
    fn render<T: Serialize>(response: ApiResponse<T>) -> Result<Self> {
        Ok(Self {
            status: response.status,
            body: serde_json::to_value(&response.body)?,
        })
    }

    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

#[derive(Debug, Serialize)]
pub struct TournamentReport {
    pub bouts: Vec<BattleResponse>,
    pub ranking_reads: Vec<RankingResponse>,
}

impl Command {
    pub async fn execute(self, service: &ArenaService) -> Result<Outcome> {
        match self {
            Self::Battle { hero1, hero2 } => {
                let request = CreateBattleRequest {
                    hero1_id: CombatantId(hero1),
                    hero2_id: CombatantId(hero2),
                };
                Outcome::render(handlers::create_battle(service, request).await)
            }
            Self::Ranking => Outcome::render(handlers::read_ranking(service).await),
            Self::Heroes => Outcome::render(ApiResponse::from_result(
                handlers::OK,
                service.list_combatants().await,
            )),
            Self::Battles { limit } => Outcome::render(ApiResponse::from_result(
                handlers::OK,
                service.recent_battles(limit).await,
            )),
            Self::Stats => {
                Outcome::render(ApiResponse::from_result(handlers::OK, service.stats().await))
            }
            Self::Health => Outcome::render(handlers::health(service).await),
            Self::Tournament { bouts } => Outcome::render(ApiResponse::from_result(
                handlers::OK,
                tournament(service, bouts).await,
            )),
        }
    }
}

async fn tournament(
    service: &ArenaService,
    bouts: usize,
) -> std::result::Result<TournamentReport, ArenaError> {
    let fighters: Vec<CombatantId> = service
        .list_combatants()
        .await?
        .into_iter()
        .filter(|combatant| combatant.can_fight())
        .map(|combatant| combatant.id)
        .collect();

    let pairings: Vec<(CombatantId, CombatantId)> = {
        let mut rng = rand::thread_rng();
        (0..bouts)
            .filter_map(|_| {
                let pair: Vec<CombatantId> =
                    fighters.choose_multiple(&mut rng, 2).copied().collect();
                match pair.as_slice() {
                    [a, b] => Some((*a, *b)),
                    _ => None,
                }
            })
            .collect()
    };

    let mut report = TournamentReport {
        bouts: Vec::with_capacity(pairings.len()),
        ranking_reads: Vec::with_capacity(2),
    };
    for (hero1, hero2) in pairings {
        let record = service.resolve_battle(hero1, hero2).await?;
        report.bouts.push(record.into());
    }
    for _ in 0..2 {
        report.ranking_reads.push(service.get_ranking().await?.into());
    }
    Ok(report)
}
