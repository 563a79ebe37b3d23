use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::dashboard::{DashboardSnapshot, LoadStatus};
use crate::models::{PerPlatform, Platform, Player, Statistics};

#[derive(Debug, Serialize)]
pub struct PlatformView {
    pub platform: Platform,
    pub label: &'static str,
    pub statistics: Option<Statistics>,
    pub players: Vec<Player>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub status: LoadStatus,
    pub loading: bool,
    pub error: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub list_limit: usize,
    pub platforms: Vec<PlatformView>,
}

impl From<&DashboardSnapshot> for DashboardResponse {
    fn from(snapshot: &DashboardSnapshot) -> Self {
        let platforms = Platform::ALL
            .into_iter()
            .map(|platform| PlatformView {
                platform,
                label: platform.label(),
                statistics: snapshot.statistics(platform).cloned(),
                players: snapshot.visible_players(platform).to_vec(),
            })
            .collect();

        Self {
            status: snapshot.status,
            loading: snapshot.is_loading(),
            error: snapshot.error.clone(),
            fetched_at: snapshot.fetched_at,
            list_limit: snapshot.list_limit,
            platforms,
        }
    }
}

/// Statistics keyed by platform slug.
pub async fn platform_stats(
    State(state): State<AppState>,
) -> Result<Json<PerPlatform<Statistics>>, ApiError> {
    let snapshot = state.current().await;
    match snapshot.statistics {
        Some(statistics) => Ok(Json(statistics)),
        None => Err(not_ready(&snapshot)),
    }
}

pub async fn dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let snapshot = state.current().await;
    Json(DashboardResponse::from(&snapshot))
}

pub(crate) fn not_ready(snapshot: &DashboardSnapshot) -> ApiError {
    match (snapshot.status, &snapshot.error) {
        (LoadStatus::Failed, Some(message)) => ApiError::Unavailable(message.clone()),
        _ => ApiError::Unavailable("Leaderboard data is still loading".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::api::test_support::get_json;
    use crate::fetch::testing::{sample_players, MockSource};
    use crate::models::Platform;
    use axum::http::StatusCode;
    use std::sync::Arc;

    fn state(source: MockSource) -> AppState {
        AppState::new(Arc::new(source), 1)
    }

    #[tokio::test]
    async fn test_stats_before_load() {
        let state = state(MockSource::new(sample_players()));
        let (status, body) = get_json(build_router(state), "/api/stats").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_stats_after_load() {
        let state = state(MockSource::new(sample_players()));
        state.refresh().await;

        let (status, body) = get_json(build_router(state), "/api/stats").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["crossplay"]["count"], 3);
        assert_eq!(body["crossplay"]["averageCashouts"], 200.0);
        assert_eq!(body["crossplay"]["mostCommonRank"], "Diamond I");
        assert_eq!(body["psn"]["mostCommonRank"], "Silver IV");
    }

    #[tokio::test]
    async fn test_stats_after_failure() {
        let state = state(MockSource::new(sample_players()).failing_on(Platform::Steam));
        state.refresh().await;

        let (status, body) = get_json(build_router(state), "/api/stats").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Failed to load leaderboard data"));
    }

    #[tokio::test]
    async fn test_dashboard_truncates_lists() {
        let state = state(MockSource::new(sample_players()));
        state.refresh().await;

        let (status, body) = get_json(build_router(state), "/api/dashboard").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["loading"], false);
        assert_eq!(body["list_limit"], 1);

        let platforms = body["platforms"].as_array().unwrap();
        assert_eq!(platforms.len(), 4);
        assert_eq!(platforms[0]["platform"], "crossplay");
        assert_eq!(platforms[0]["label"], "CROSSPLAY");
        assert_eq!(platforms[0]["players"].as_array().unwrap().len(), 1);
        assert_eq!(platforms[0]["statistics"]["count"], 3);
    }

    #[tokio::test]
    async fn test_dashboard_failed_has_no_statistics() {
        let state = state(MockSource::new(sample_players()).failing_on(Platform::Xbox));
        state.refresh().await;

        let (_, body) = get_json(build_router(state), "/api/dashboard").await;

        assert_eq!(body["status"], "failed");
        assert!(body["error"].is_string());
        for platform in body["platforms"].as_array().unwrap() {
            assert!(platform["statistics"].is_null());
            assert!(platform["players"].as_array().unwrap().is_empty());
        }
    }
}
