use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;
use strum_macros::{Display, EnumString};
use tracing::{debug, instrument};

use super::engine::compute;
use super::models::StatsSnapshot;
use super::scoring::ScoringConfig;
use crate::results::ResultRepository;
use crate::shared::AppError;

/// Ranking metrics. Mean attempts ranks ascending (fewer is better);
/// everything else descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardMetric {
    MeanAttempts,
    WinRate,
    CurrentStreak,
    BestStreak,
    Points,
    Aces,
    Completions,
}

impl LeaderboardMetric {
    fn ascending(&self) -> bool {
        matches!(self, LeaderboardMetric::MeanAttempts)
    }

    /// Metric value for one player, or `None` when the snapshot has no data
    /// for it (a player with no wins has no mean attempts).
    fn value(&self, snapshot: &StatsSnapshot) -> Option<f64> {
        match self {
            LeaderboardMetric::MeanAttempts => snapshot.mean_attempts,
            LeaderboardMetric::WinRate => Some(snapshot.win_rate),
            LeaderboardMetric::CurrentStreak => Some(f64::from(snapshot.current_streak)),
            LeaderboardMetric::BestStreak => Some(f64::from(snapshot.best_streak)),
            LeaderboardMetric::Points => Some(snapshot.points as f64),
            LeaderboardMetric::Aces => Some(f64::from(snapshot.distribution.aces())),
            LeaderboardMetric::Completions => Some(f64::from(snapshot.total_games)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardRow {
    pub player_id: String,
    pub display_name: String,
    pub value: f64,
    pub games: u32,
}

/// Reply payload for a leaderboard request; rendering into platform markup
/// is the collaborator's job.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardTable {
    pub guild_id: String,
    pub metric: LeaderboardMetric,
    pub rows: Vec<LeaderboardRow>,
}

/// Ranks a guild's players by a metric over their in-guild histories.
///
/// Ties break by games played descending, then player id ascending, so the
/// output is a deterministic total order. Players with no games in the
/// guild never appear (guild membership itself derives from results).
pub struct LeaderboardBuilder {
    repository: Arc<dyn ResultRepository>,
    scoring: ScoringConfig,
}

impl LeaderboardBuilder {
    pub fn new(repository: Arc<dyn ResultRepository>, scoring: ScoringConfig) -> Self {
        Self {
            repository,
            scoring,
        }
    }

    #[instrument(skip(self))]
    pub async fn rank(
        &self,
        guild_id: &str,
        metric: LeaderboardMetric,
        limit: usize,
    ) -> Result<LeaderboardTable, AppError> {
        let members = self.repository.members(guild_id).await?;
        debug!(members = members.len(), "Ranking guild members");

        let mut rows = Vec::with_capacity(members.len());
        for player_id in members {
            let history = self.repository.history(&player_id, Some(guild_id)).await?;
            if history.is_empty() {
                continue;
            }

            let snapshot = compute(&history, &self.scoring);
            let Some(value) = metric.value(&snapshot) else {
                continue;
            };

            let display_name = self
                .repository
                .get_player(&player_id)
                .await?
                .map(|player| player.display_name)
                .unwrap_or_else(|| player_id.clone());

            rows.push(LeaderboardRow {
                player_id,
                display_name,
                value,
                games: snapshot.total_games,
            });
        }

        rows.sort_by(|a, b| Self::order(metric, a, b));
        rows.truncate(limit);

        Ok(LeaderboardTable {
            guild_id: guild_id.to_string(),
            metric,
            rows,
        })
    }

    fn order(metric: LeaderboardMetric, a: &LeaderboardRow, b: &LeaderboardRow) -> Ordering {
        let by_value = if metric.ascending() {
            a.value.total_cmp(&b.value)
        } else {
            b.value.total_cmp(&a.value)
        };

        by_value
            .then(b.games.cmp(&a.games))
            .then_with(|| a.player_id.cmp(&b.player_id))
    }
}
