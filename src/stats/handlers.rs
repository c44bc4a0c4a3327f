use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

use super::leaderboard::{LeaderboardBuilder, LeaderboardMetric, LeaderboardTable};
use super::models::PlayerCard;
use super::service::StatsService;
use crate::results::{HistoryQuery, StoredResult};
use crate::shared::{AppError, AppState};

const DEFAULT_LEADERBOARD_LIMIT: usize = 10;
const MAX_LEADERBOARD_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct StatsParams {
    pub guild_id: Option<String>,
}

/// HTTP handler for a player statistics card
///
/// GET /players/:player_id/stats
#[instrument(name = "player_stats", skip(state))]
pub async fn player_stats(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Query(params): Query<StatsParams>,
) -> Result<Json<PlayerCard>, AppError> {
    let service = StatsService::new(
        Arc::clone(&state.result_repository),
        state.scoring.clone(),
    );
    let card = service
        .player_card(&player_id, params.guild_id.as_deref())
        .await?;

    Ok(Json(card))
}

/// HTTP handler for a player's history page
///
/// GET /players/:player_id/history
#[instrument(name = "player_history", skip(state, query))]
pub async fn player_history(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<StoredResult>>, AppError> {
    let service = StatsService::new(
        Arc::clone(&state.result_repository),
        state.scoring.clone(),
    );
    let page = service.history_page(&player_id, &query).await?;

    Ok(Json(page))
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub metric: Option<String>,
    pub limit: Option<usize>,
}

/// HTTP handler for a guild leaderboard
///
/// GET /guilds/:guild_id/leaderboard
#[instrument(name = "guild_leaderboard", skip(state))]
pub async fn guild_leaderboard(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardTable>, AppError> {
    let metric = params
        .metric
        .as_deref()
        .unwrap_or("points")
        .parse::<LeaderboardMetric>()
        .map_err(|_| AppError::BadRequest("Unknown leaderboard metric".to_string()))?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .clamp(1, MAX_LEADERBOARD_LIMIT);

    let builder = LeaderboardBuilder::new(
        Arc::clone(&state.result_repository),
        state.scoring.clone(),
    );
    let table = builder.rank(&guild_id, metric, limit).await?;

    Ok(Json(table))
}
