use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::dashboard::{self, DashboardEvent, DashboardSnapshot};
use crate::fetch::LeaderboardSource;

#[derive(Clone)]
pub struct AppState {
    pub snapshot: Arc<RwLock<DashboardSnapshot>>,
    pub source: Arc<dyn LeaderboardSource>,
    /// Held for a whole refresh so loads publish in the order they started
    refresh_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(source: Arc<dyn LeaderboardSource>, list_limit: usize) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(DashboardSnapshot::new(list_limit))),
            source,
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Current snapshot.
    pub async fn current(&self) -> DashboardSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Reload every leaderboard and publish the resulting snapshot.
    ///
    /// Refreshes run one at a time. The snapshot lock is not held while the
    /// requests are in flight, so readers still see the previous state.
    pub async fn refresh(&self) -> DashboardSnapshot {
        let _running = self.refresh_lock.lock().await;

        {
            let mut snapshot = self.snapshot.write().await;
            *snapshot = snapshot.apply(DashboardEvent::Started);
        }

        let event = dashboard::load(self.source.as_ref()).await;

        let mut snapshot = self.snapshot.write().await;
        *snapshot = snapshot.apply(event);
        snapshot.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::player;
    use crate::fetch::FetchError;
    use crate::models::{Platform, Player};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Each load returns one more crossplay player than the last; the first
    /// load is slow.
    struct SlowFirstSource {
        loads: AtomicUsize,
    }

    #[async_trait]
    impl LeaderboardSource for SlowFirstSource {
        fn name(&self) -> &'static str {
            "slow-first"
        }

        async fn fetch_platform(&self, platform: Platform) -> Result<Vec<Player>, FetchError> {
            if platform != Platform::Crossplay {
                return Ok(Vec::new());
            }

            let load = self.loads.fetch_add(1, Ordering::SeqCst);
            if load == 0 {
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
            Ok((0..=load as u32).map(|r| player(r + 1, 20, 10)).collect())
        }
    }

    #[tokio::test]
    async fn test_overlapping_refreshes_keep_latest() {
        let source = SlowFirstSource {
            loads: AtomicUsize::new(0),
        };
        let state = AppState::new(Arc::new(source), 10);

        let first = tokio::spawn({
            let state = state.clone();
            async move { state.refresh().await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        let second = state.refresh().await;
        let first = first.await.unwrap();

        assert_eq!(first.players.crossplay.len(), 1);
        assert_eq!(second.players.crossplay.len(), 2);

        let current = state.current().await;
        assert!(current.is_ready());
        assert_eq!(current.players.crossplay.len(), 2);
        assert_eq!(current.statistics(Platform::Crossplay).unwrap().count, 2);
    }
}
