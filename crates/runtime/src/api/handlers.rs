//! Transport-agnostic request handlers.
//!
//! An HTTP layer only needs to decode the body, call one of these and write
//! `status` plus the serialized body back.

use crate::service::{ArenaService, HealthReport};

use super::contract::{ApiResponse, BattleResponse, CreateBattleRequest, RankingResponse};

pub const CREATED: u16 = 201;
pub const OK: u16 = 200;

/// `POST /battle`
pub async fn create_battle(
    service: &ArenaService,
    request: CreateBattleRequest,
) -> ApiResponse<BattleResponse> {
    let result = service
        .resolve_battle(request.hero1_id, request.hero2_id)
        .await
        .map(BattleResponse::from);
    ApiResponse::from_result(CREATED, result)
}

/// `GET /ranking`
pub async fn read_ranking(service: &ArenaService) -> ApiResponse<RankingResponse> {
    let result = service.get_ranking().await.map(RankingResponse::from);
    ApiResponse::from_result(OK, result)
}

/// `GET /health`
pub async fn health(service: &ArenaService) -> ApiResponse<HealthReport> {
    let report = service.health().await;
    ApiResponse::ok(report.status_code(), report)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arena_core::{CombatantId, CombatantSpec, ErrorKind};

    use super::*;
    use crate::api::ApiBody;
    use crate::repository::InMemoryCombatantStore;

    fn service() -> ArenaService {
        let roster = ["Aria", "Brom"]
            .into_iter()
            .map(|name| CombatantSpec {
                name: name.to_string(),
                class: "Knight".to_string(),
                level: 1,
                attack_power: 40,
                defense_power: 10,
                health_points: 80,
            })
            .collect();
        ArenaService::builder(Arc::new(InMemoryCombatantStore::with_roster(roster))).build()
    }

    #[tokio::test]
    async fn test_create_battle_returns_created() {
        let service = service();
        let response = create_battle(
            &service,
            CreateBattleRequest {
                hero1_id: CombatantId(1),
                hero2_id: CombatantId(2),
            },
        )
        .await;

        assert_eq!(response.status, 201);
        let json = serde_json::to_value(&response.body).unwrap();
        assert!(json["battle_id"].is_u64());
        assert!(json["result"]["log"].as_str().unwrap().contains("VS"));
    }

    #[tokio::test]
    async fn test_errors_carry_kind_and_status() {
        let service = service();
        let same = create_battle(
            &service,
            CreateBattleRequest {
                hero1_id: CombatantId(1),
                hero2_id: CombatantId(1),
            },
        )
        .await;
        assert_eq!(same.status, 400);

        let missing = create_battle(
            &service,
            CreateBattleRequest {
                hero1_id: CombatantId(1),
                hero2_id: CombatantId(42),
            },
        )
        .await;
        assert_eq!(missing.status, 404);
        match missing.body {
            ApiBody::Err(body) => {
                assert_eq!(body.kind, ErrorKind::NotFound);
                assert!(!body.retryable);
            }
            ApiBody::Ok(_) => panic!("expected an error body"),
        }
    }

    #[tokio::test]
    async fn test_ranking_reports_source() {
        let service = service();
        let first = serde_json::to_value(read_ranking(&service).await.body).unwrap();
        assert_eq!(first["source"], "store");
        assert!(first.get("cached_at").is_none());

        let second = serde_json::to_value(read_ranking(&service).await.body).unwrap();
        assert_eq!(second["source"], "cache");
        assert!(second["cached_at"].is_string());
        assert_eq!(second["ranking"], first["ranking"]);
    }

    #[tokio::test]
    async fn test_health_of_in_memory_arena() {
        let response = health(&service()).await;
        assert_eq!(response.status, 200);
        let json = serde_json::to_value(&response.body).unwrap();
        assert_eq!(json["store"]["status"], "healthy");
    }
}
