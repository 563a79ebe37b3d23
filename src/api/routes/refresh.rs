use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::state::AppState;
use crate::dashboard::LoadStatus;

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub status: LoadStatus,
    pub error: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Reload all four leaderboards now.
pub async fn refresh(State(state): State<AppState>) -> Json<RefreshResponse> {
    tracing::info!("Manual refresh requested");
    let snapshot = state.refresh().await;

    Json(RefreshResponse {
        status: snapshot.status,
        error: snapshot.error,
        fetched_at: snapshot.fetched_at,
    })
}
