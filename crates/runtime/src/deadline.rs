//! Timeout wrapper applied to every store and cache call.

use std::future::Future;
use std::time::Duration;

use crate::api::{ArenaError, Component};

/// Awaits `call`, failing with [`ArenaError::Timeout`] once `after` elapses.
pub(crate) async fn bounded<T, E, F>(
    component: Component,
    operation: &'static str,
    after: Duration,
    call: F,
) -> Result<T, ArenaError>
where
    F: Future<Output = Result<T, E>>,
    ArenaError: From<E>,
{
    match tokio::time::timeout(after, call).await {
        Ok(result) => result.map_err(ArenaError::from),
        Err(_) => Err(ArenaError::Timeout {
            component,
            operation,
            after,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheError;

    #[tokio::test(start_paused = true)]
    async fn test_slow_call_times_out() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, CacheError>(())
        };
        let err = bounded(Component::Cache, "get", Duration::from_millis(10), slow)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ArenaError::Timeout {
                component: Component::Cache,
                operation: "get",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let value = bounded(Component::Store, "ping", Duration::from_secs(1), async {
            Ok::<_, CacheError>(7)
        })
        .await
        .unwrap();
        assert_eq!(value, 7);
    }
}
