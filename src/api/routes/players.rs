use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Platform, Player};

use super::stats::not_ready;

#[derive(Debug, Deserialize)]
pub struct PlayersParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PlayersResponse {
    pub platform: Platform,
    pub total: usize,
    pub players: Vec<Player>,
}

pub async fn platform_players(
    State(state): State<AppState>,
    Path(platform): Path<String>,
    Query(params): Query<PlayersParams>,
) -> Result<Json<PlayersResponse>, ApiError> {
    let platform: Platform = platform.parse().map_err(ApiError::BadRequest)?;

    let snapshot = state.current().await;
    if !snapshot.is_ready() {
        return Err(not_ready(&snapshot));
    }

    let limit = params.limit.unwrap_or(snapshot.list_limit);
    Ok(Json(PlayersResponse {
        platform,
        total: snapshot.players.get(platform).len(),
        players: snapshot.players_up_to(platform, limit).to_vec(),
    }))
}
