//! Leaderboard HTTP client.
//!
//! Fetches one leaderboard per platform from the public leaderboard API and
//! joins the four requests into a single all-or-nothing result.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::models::{PerPlatform, Platform, Player};

/// Errors that can occur during fetching.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP {status} from {url}: {message}")]
    HttpStatus {
        url: String,
        status: u16,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Metadata block of a leaderboard response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardMeta {
    #[serde(default)]
    pub leaderboard_version: String,
    #[serde(default)]
    pub leaderboard_platform: String,
    #[serde(default)]
    pub return_raw_data: bool,
    #[serde(default)]
    pub return_count_only: bool,
}

/// Body of `GET /v1/leaderboard/{season}/{platform}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    #[serde(default)]
    pub meta: LeaderboardMeta,
    #[serde(default)]
    pub count: u64,
    pub data: Vec<Player>,
}

/// Configuration for the leaderboard client.
#[derive(Debug, Clone)]
pub struct LeaderboardClientConfig {
    /// API root, e.g. `https://api.the-finals-leaderboard.com`
    pub base_url: Url,

    /// Season path segment, e.g. `season2`
    pub season: String,

    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,
}

impl Default for LeaderboardClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            season: DEFAULT_SEASON.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("finals-stats/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

pub const DEFAULT_BASE_URL: &str = "https://api.the-finals-leaderboard.com";
pub const DEFAULT_SEASON: &str = "season2";

/// Anything that can produce a platform's leaderboard.
#[async_trait]
pub trait LeaderboardSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &'static str;

    /// Fetch the full player list for one platform.
    async fn fetch_platform(&self, platform: Platform) -> Result<Vec<Player>, FetchError>;
}

/// HTTP client for the public leaderboard API.
pub struct LeaderboardClient {
    client: Client,
    config: LeaderboardClientConfig,
}

impl LeaderboardClient {
    /// Create a new client with the given configuration.
    pub fn new(config: LeaderboardClientConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("finals-stats")),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a client with default configuration.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(LeaderboardClientConfig::default())
    }

    /// Leaderboard URL for a platform.
    pub fn endpoint_url(&self, platform: Platform) -> Result<Url, FetchError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.config.base_url.to_string()))?
            .pop_if_empty()
            .extend(["v1", "leaderboard", self.config.season.as_str(), platform.slug()]);
        Ok(url)
    }

    /// Fetch and decode the full response for a platform.
    pub async fn fetch_response(
        &self,
        platform: Platform,
    ) -> Result<LeaderboardResponse, FetchError> {
        let url = self.endpoint_url(platform)?;
        info!("Fetching {} leaderboard from {}", platform, url);

        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.bytes().await?;
        let parsed: LeaderboardResponse = serde_json::from_slice(&body)?;

        debug!(
            "{} leaderboard: {} players (reported count {})",
            platform,
            parsed.data.len(),
            parsed.count
        );
        Ok(parsed)
    }
}

#[async_trait]
impl LeaderboardSource for LeaderboardClient {
    fn name(&self) -> &'static str {
        "leaderboard-api"
    }

    async fn fetch_platform(&self, platform: Platform) -> Result<Vec<Player>, FetchError> {
        Ok(self.fetch_response(platform).await?.data)
    }
}

/// Fetch all four leaderboards concurrently.
///
/// Returns every platform's players, or the first error if any request fails.
pub async fn fetch_all(
    source: &dyn LeaderboardSource,
) -> Result<PerPlatform<Vec<Player>>, FetchError> {
    let (crossplay, steam, psn, xbox) = tokio::try_join!(
        source.fetch_platform(Platform::Crossplay),
        source.fetch_platform(Platform::Steam),
        source.fetch_platform(Platform::Psn),
        source.fetch_platform(Platform::Xbox),
    )?;

    Ok(PerPlatform {
        crossplay,
        steam,
        psn,
        xbox,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashSet;

    use super::*;
    use crate::models::LinkedAccounts;

    pub fn player(rank: u32, league_number: i64, cashouts: u64) -> Player {
        Player {
            rank,
            change: 0,
            league_number,
            league: String::new(),
            name: format!("player#{}", rank),
            accounts: LinkedAccounts::default(),
            cashouts: cashouts as f64,
        }
    }

    /// In-memory source; platforms listed in `failing` return a 500.
    pub struct MockSource {
        pub players: PerPlatform<Vec<Player>>,
        pub failing: HashSet<Platform>,
    }

    impl MockSource {
        pub fn new(players: PerPlatform<Vec<Player>>) -> Self {
            Self {
                players,
                failing: HashSet::new(),
            }
        }

        pub fn failing_on(mut self, platform: Platform) -> Self {
            self.failing.insert(platform);
            self
        }
    }

    #[async_trait]
    impl LeaderboardSource for MockSource {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn fetch_platform(&self, platform: Platform) -> Result<Vec<Player>, FetchError> {
            if self.failing.contains(&platform) {
                return Err(FetchError::HttpStatus {
                    url: format!("mock://{}", platform),
                    status: 500,
                    message: "Internal Server Error".to_string(),
                });
            }
            Ok(self.players.get(platform).clone())
        }
    }

    pub fn sample_players() -> PerPlatform<Vec<Player>> {
        PerPlatform {
            crossplay: vec![player(1, 20, 100), player(2, 20, 200), player(3, 18, 300)],
            steam: vec![player(1, 12, 50), player(2, 9, 70)],
            psn: vec![player(1, 5, 10)],
            xbox: vec![player(1, 17, 0), player(2, 17, 0)],
        }
    }
}
