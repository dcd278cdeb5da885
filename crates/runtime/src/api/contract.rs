//! Request and response shapes of the inbound API.
//!
//! Transport is out of scope; these types fix the JSON contract an HTTP layer
//! must preserve.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use arena_core::{BattleId, BattleRecord, CombatantId, ErrorKind, RankingEntry};

use super::errors::ArenaError;
use crate::ranking::{RankingSource, RankingView};

/// Body of the battle-creation request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBattleRequest {
    pub hero1_id: CombatantId,
    pub hero2_id: CombatantId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    pub winner_id: Option<CombatantId>,
    pub hero1_damage: u64,
    pub hero2_damage: u64,
    pub rounds: u32,
    pub log: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResponse {
    pub battle_id: BattleId,
    pub result: BattleResult,
}

impl From<BattleRecord> for BattleResponse {
    fn from(record: BattleRecord) -> Self {
        Self {
            battle_id: record.id,
            result: BattleResult {
                winner_id: record.winner_id,
                hero1_damage: record.hero1_damage_dealt,
                hero2_damage: record.hero2_damage_dealt,
                rounds: record.rounds,
                log: record.battle_log,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankingResponse {
    pub source: RankingSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<DateTime<Utc>>,
    pub ranking: Vec<RankingEntry>,
}

impl From<RankingView> for RankingResponse {
    fn from(view: RankingView) -> Self {
        Self {
            source: view.source,
            cached_at: view.cached_at,
            ranking: view.entries,
        }
    }
}

/// Structured error body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
    pub retryable: bool,
}

impl From<&ArenaError> for ErrorResponse {
    fn from(error: &ArenaError) -> Self {
        let kind = error.kind();
        Self {
            error: error.to_string(),
            kind,
            retryable: kind.is_retryable(),
        }
    }
}

/// Status plus either a success body or an error body.
///
/// A transport writes `status` as the response status and serializes only
/// `body`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub body: ApiBody<T>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiBody<T> {
    Ok(T),
    Err(ErrorResponse),
}

impl<T> ApiResponse<T> {
    pub fn ok(status: u16, body: T) -> Self {
        Self {
            status,
            body: ApiBody::Ok(body),
        }
    }

    pub fn from_result(status: u16, result: Result<T, ArenaError>) -> Self {
        match result {
            Ok(body) => Self::ok(status, body),
            Err(error) => Self {
                status: error.kind().status_code(),
                body: ApiBody::Err(ErrorResponse::from(&error)),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.body, ApiBody::Ok(_))
    }
}
