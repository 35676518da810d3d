//! Periodic purge sweep.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use super::store::CacheStore;

/// Spawn a background task that purges expired entries from `store` every
/// `every` interval.
///
/// The sweep runs independently of request handling; reads stay correct even
/// if it never runs, since `get` checks freshness itself. The caller owns the
/// returned handle and aborts it on shutdown.
pub fn spawn_purge_task(store: Arc<CacheStore>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match store.purge_expired().await {
                Ok(0) => {}
                Ok(removed) => debug!(removed, "purged expired cache entries"),
                Err(e) => warn!(error = %e, "cache purge sweep failed"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store::CacheConfig;

    #[tokio::test]
    async fn purge_task_runs_and_can_be_aborted() {
        let store = Arc::new(CacheStore::in_memory(CacheConfig::default()));
        let handle = spawn_purge_task(Arc::clone(&store), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());
    }
}
