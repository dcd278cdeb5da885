//! Cache coherence of the leaderboard: TTL expiry, invalidation on writes and
//! degradation when the cache or store misbehaves.

mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use arena_core::{CombatantId, ErrorKind};
use arena_runtime::{
    ArenaError, ArenaService, Component, RANKING_KEY, RANKING_TTL, RankingSource,
};

use common::{BrokenCache, FlakyStore, arena, config};

#[tokio::test(start_paused = true)]
async fn test_cached_ranking_expires_after_ttl() {
    let arena = arena();

    let first = arena.service.get_ranking().await.unwrap();
    assert_eq!(first.source, RankingSource::Store);
    assert_eq!(arena.cache.ttl_remaining(RANKING_KEY), Some(RANKING_TTL));

    tokio::time::advance(Duration::from_secs(59)).await;
    let second = arena.service.get_ranking().await.unwrap();
    assert_eq!(second.source, RankingSource::Cache);
    assert_eq!(second.entries, first.entries);

    tokio::time::advance(Duration::from_secs(2)).await;
    let third = arena.service.get_ranking().await.unwrap();
    assert_eq!(third.source, RankingSource::Store);

    let counters = arena.service.counters();
    assert_eq!((counters.cache_hits, counters.cache_misses), (1, 2));
}

/// Read, read, battle, read, read: the battle forces exactly one store read
/// which already reflects the new stats.
#[tokio::test]
async fn test_battle_invalidates_ranking() {
    let arena = arena();

    assert_eq!(
        arena.service.get_ranking().await.unwrap().source,
        RankingSource::Store
    );
    let cached = arena.service.get_ranking().await.unwrap();
    assert_eq!(cached.source, RankingSource::Cache);

    let record = arena
        .service
        .resolve_battle(CombatantId(3), CombatantId(4))
        .await
        .unwrap();
    assert!(!arena.cache.contains(RANKING_KEY));

    let fresh = arena.service.get_ranking().await.unwrap();
    assert_eq!(fresh.source, RankingSource::Store);
    assert_ne!(fresh.entries, cached.entries);

    let fought: u32 = fresh
        .entries
        .iter()
        .filter(|entry| entry.name == "Cyra" || entry.name == "Dusk")
        .map(|entry| entry.wins + entry.losses + entry.draws)
        .sum();
    assert_eq!(fought, 2);
    if record.winner_id.is_some() {
        assert_eq!(fresh.entries[0].ranking_points, 3);
    }

    let again = arena.service.get_ranking().await.unwrap();
    assert_eq!(again.source, RankingSource::Cache);
    assert_eq!(again.entries, fresh.entries);
}

fn battles_counted(entries: &[arena_core::RankingEntry]) -> u32 {
    entries
        .iter()
        .map(|entry| entry.wins + entry.losses + entry.draws)
        .sum()
}

/// A leaderboard read that started before a battle must not write its stale
/// snapshot back after the battle invalidated the cache.
#[tokio::test]
async fn test_snapshot_read_before_battle_is_not_cached() {
    let store = Arc::new(FlakyStore::new());
    let cache = Arc::new(arena_runtime::InMemoryRankingCache::new());
    let service = ArenaService::builder(store.clone())
        .cache(cache.clone())
        .config(config())
        .build();

    store.hold_ranking.store(true, Ordering::SeqCst);
    let reader = tokio::spawn({
        let service = service.clone();
        async move { service.get_ranking().await }
    });
    store.ranking_taken.notified().await;
    store.hold_ranking.store(false, Ordering::SeqCst);

    service
        .resolve_battle(CombatantId(1), CombatantId(2))
        .await
        .unwrap();
    store.ranking_release.notify_one();

    let stale = reader.await.unwrap().unwrap();
    assert_eq!(stale.source, RankingSource::Store);
    assert_eq!(battles_counted(&stale.entries), 0);
    assert!(!cache.contains(RANKING_KEY));

    let fresh = service.get_ranking().await.unwrap();
    assert_eq!(fresh.source, RankingSource::Store);
    assert_eq!(battles_counted(&fresh.entries), 2);
    assert!(cache.contains(RANKING_KEY));
}

#[tokio::test]
async fn test_ranking_is_ordered_and_limited() {
    let arena = arena();
    for _ in 0..4 {
        arena
            .service
            .resolve_battle(CombatantId(1), CombatantId(2))
            .await
            .unwrap();
    }

    let view = arena.service.get_ranking().await.unwrap();
    assert!(view.entries.len() <= arena.service.config().ranking_limit);
    assert!(
        view.entries
            .windows(2)
            .all(|w| (w[0].ranking_points, w[0].level) >= (w[1].ranking_points, w[1].level))
    );
    for entry in &view.entries {
        assert!((0.0..=100.0).contains(&entry.win_rate));
    }
}

#[tokio::test]
async fn test_failing_cache_degrades_to_store() {
    let store = Arc::new(FlakyStore::new());
    let service = ArenaService::builder(store.clone())
        .cache(Arc::new(BrokenCache { hang: false }))
        .config(config())
        .build();

    for _ in 0..2 {
        let view = service.get_ranking().await.unwrap();
        assert_eq!(view.source, RankingSource::Store);
    }

    // Invalidation fails after the commit; the battle still counts.
    service
        .resolve_battle(CombatantId(1), CombatantId(2))
        .await
        .expect("cache failure must not fail a committed battle");
    assert_eq!(store.inner.battle_count().unwrap(), 1);

    let health = service.health().await;
    assert!(health.store.is_healthy());
    assert!(!health.cache.is_healthy());
    assert_eq!(health.status_code(), 503);
}

#[tokio::test(start_paused = true)]
async fn test_hanging_cache_times_out_to_store() {
    let store = Arc::new(FlakyStore::new());
    let service = ArenaService::builder(store)
        .cache(Arc::new(BrokenCache { hang: true }))
        .config(config())
        .build();

    let view = service.get_ranking().await.unwrap();
    assert_eq!(view.source, RankingSource::Store);
    assert_eq!(view.entries.len(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_hanging_store_is_unavailable() {
    let store = Arc::new(FlakyStore::new());
    let service = ArenaService::builder(store.clone())
        .config(config())
        .build();
    store.hang_reads.store(true, Ordering::SeqCst);

    let err = service
        .resolve_battle(CombatantId(1), CombatantId(2))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ArenaError::Timeout {
            component: Component::Store,
            operation: "get_combatant",
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Unavailable);
    assert!(err.is_retryable());

    let err = service.get_ranking().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unavailable);
    assert_eq!(store.inner.battle_count().unwrap(), 0);
}

#[tokio::test]
async fn test_failed_commit_keeps_cache_and_stats() {
    let store = Arc::new(FlakyStore::new());
    let cache = Arc::new(arena_runtime::InMemoryRankingCache::new());
    let service = ArenaService::builder(store.clone())
        .cache(cache.clone())
        .config(config())
        .build();

    let before = service.get_ranking().await.unwrap();
    store.fail_commits.store(true, Ordering::SeqCst);

    let err = service
        .resolve_battle(CombatantId(1), CombatantId(2))
        .await
        .unwrap_err();
    assert!(matches!(err, ArenaError::Store(_)));
    assert_eq!(err.kind(), ErrorKind::Unavailable);

    assert!(cache.contains(RANKING_KEY));
    assert_eq!(store.inner.battle_count().unwrap(), 0);
    assert_eq!(service.counters().battles, 0);

    let after = service.get_ranking().await.unwrap();
    assert_eq!(after.source, RankingSource::Cache);
    assert_eq!(after.entries, before.entries);
}

/// A commit that times out may still have landed, so the cached leaderboard
/// is dropped anyway.
#[tokio::test(start_paused = true)]
async fn test_commit_timeout_invalidates_ranking() {
    let store = Arc::new(FlakyStore::new());
    let cache = Arc::new(arena_runtime::InMemoryRankingCache::new());
    let service = ArenaService::builder(store.clone())
        .cache(cache.clone())
        .config(config())
        .build();

    service.get_ranking().await.unwrap();
    assert!(cache.contains(RANKING_KEY));
    store.hang_commits.store(true, Ordering::SeqCst);

    let err = service
        .resolve_battle(CombatantId(1), CombatantId(2))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ArenaError::Timeout {
            component: Component::Store,
            operation: "commit_battle",
            ..
        }
    ));
    assert!(!cache.contains(RANKING_KEY));
    assert_eq!(store.inner.battle_count().unwrap(), 1);

    let view = service.get_ranking().await.unwrap();
    assert_eq!(view.source, RankingSource::Store);
    assert_eq!(battles_counted(&view.entries), 2);
}
