//! Dashboard state.
//!
//! The dashboard is a single immutable [`DashboardSnapshot`]. Every fetch
//! lifecycle event produces a new snapshot through [`DashboardSnapshot::apply`],
//! so players, statistics and the error message always change together.

pub mod render;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::calculate::compute_platform_statistics;
use crate::fetch::{fetch_all, LeaderboardSource};
use crate::models::{PerPlatform, Platform, Player, Statistics};

/// Message shown when any leaderboard fails to load.
pub const LOAD_FAILED_PREFIX: &str = "Failed to load leaderboard data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Fetch lifecycle events.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// A load has been issued.
    Started,

    /// All four leaderboards arrived.
    Loaded {
        players: PerPlatform<Vec<Player>>,
        fetched_at: DateTime<Utc>,
    },

    /// At least one leaderboard failed.
    Failed { message: String },
}

/// Everything the dashboard presents, as of one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub status: LoadStatus,
    pub players: PerPlatform<Vec<Player>>,
    /// Present only once all four leaderboards loaded
    pub statistics: Option<PerPlatform<Statistics>>,
    pub error: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
    /// Players listed per platform
    pub list_limit: usize,
}

impl DashboardSnapshot {
    pub fn new(list_limit: usize) -> Self {
        Self {
            status: LoadStatus::Idle,
            players: PerPlatform::default(),
            statistics: None,
            error: None,
            fetched_at: None,
            list_limit,
        }
    }

    /// Produce the snapshot that follows `event`.
    pub fn apply(&self, event: DashboardEvent) -> Self {
        match event {
            DashboardEvent::Started => Self {
                status: LoadStatus::Loading,
                error: None,
                ..self.clone()
            },
            DashboardEvent::Loaded {
                players,
                fetched_at,
            } => {
                let statistics = compute_platform_statistics(&players);
                Self {
                    status: LoadStatus::Ready,
                    players,
                    statistics: Some(statistics),
                    error: None,
                    fetched_at: Some(fetched_at),
                    list_limit: self.list_limit,
                }
            }
            DashboardEvent::Failed { message } => Self {
                status: LoadStatus::Failed,
                players: PerPlatform::default(),
                statistics: None,
                error: Some(message),
                fetched_at: None,
                list_limit: self.list_limit,
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready
    }

    /// Statistics for one platform, once loaded.
    pub fn statistics(&self, platform: Platform) -> Option<&Statistics> {
        self.statistics.as_ref().map(|s| s.get(platform))
    }

    /// The platform's players truncated to `list_limit`.
    pub fn visible_players(&self, platform: Platform) -> &[Player] {
        self.players_up_to(platform, self.list_limit)
    }

    /// The platform's players truncated to `limit`.
    pub fn players_up_to(&self, platform: Platform, limit: usize) -> &[Player] {
        let players = self.players.get(platform);
        &players[..players.len().min(limit)]
    }
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Fetch all four leaderboards and turn the outcome into an event.
pub async fn load(source: &dyn LeaderboardSource) -> DashboardEvent {
    match fetch_all(source).await {
        Ok(players) => {
            info!(
                "Loaded leaderboards from {}: crossplay={}, steam={}, psn={}, xbox={}",
                source.name(),
                players.crossplay.len(),
                players.steam.len(),
                players.psn.len(),
                players.xbox.len()
            );
            DashboardEvent::Loaded {
                players,
                fetched_at: Utc::now(),
            }
        }
        Err(e) => {
            error!("Error fetching leaderboards from {}: {}", source.name(), e);
            DashboardEvent::Failed {
                message: format!("{}: {}", LOAD_FAILED_PREFIX, e),
            }
        }
    }
}

/// Run one full load cycle starting from `snapshot`.
pub async fn refresh(
    snapshot: &DashboardSnapshot,
    source: &dyn LeaderboardSource,
) -> DashboardSnapshot {
    let loading = snapshot.apply(DashboardEvent::Started);
    loading.apply(load(source).await)
}
