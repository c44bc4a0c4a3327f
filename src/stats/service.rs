use std::sync::Arc;
use tracing::{debug, instrument};

use super::engine::compute;
use super::models::{PlayerCard, StatsSnapshot};
use super::scoring::ScoringConfig;
use crate::results::{HistoryQuery, ResultRepository, StoredResult};
use crate::shared::AppError;

/// Service for player statistics queries. Read-only over the repository;
/// abandoning a call mid-flight discards nothing but the computation.
pub struct StatsService {
    repository: Arc<dyn ResultRepository>,
    scoring: ScoringConfig,
}

impl StatsService {
    pub fn new(repository: Arc<dyn ResultRepository>, scoring: ScoringConfig) -> Self {
        Self {
            repository,
            scoring,
        }
    }

    /// Snapshot over a player's history, optionally scoped to one guild.
    /// A player with no recorded results gets an all-zero snapshot.
    #[instrument(skip(self))]
    pub async fn player_stats(
        &self,
        player_id: &str,
        guild_id: Option<&str>,
    ) -> Result<StatsSnapshot, AppError> {
        let history = self.repository.history(player_id, guild_id).await?;
        debug!(games = history.len(), "Computing player snapshot");

        Ok(compute(&history, &self.scoring))
    }

    /// Reply payload for the stats command. Not-found when the player has
    /// no recorded results in scope.
    #[instrument(skip(self))]
    pub async fn player_card(
        &self,
        player_id: &str,
        guild_id: Option<&str>,
    ) -> Result<PlayerCard, AppError> {
        let history = self.repository.history(player_id, guild_id).await?;
        if history.is_empty() {
            return Err(AppError::NotFound(
                "No Wordle statistics found for this player".to_string(),
            ));
        }

        let snapshot = compute(&history, &self.scoring);
        let display_name = self
            .repository
            .get_player(player_id)
            .await?
            .map(|player| player.display_name)
            .unwrap_or_else(|| player_id.to_string());
        let total_puzzles = self.repository.count_puzzles().await?;

        Ok(PlayerCard {
            player_id: player_id.to_string(),
            display_name,
            snapshot,
            total_puzzles,
        })
    }

    /// A filtered history page, most recent puzzle first.
    #[instrument(skip(self, query))]
    pub async fn history_page(
        &self,
        player_id: &str,
        query: &HistoryQuery,
    ) -> Result<Vec<StoredResult>, AppError> {
        query.validate()?;

        let history = self
            .repository
            .history(player_id, query.guild_id.as_deref())
            .await?;

        Ok(query.apply(history))
    }
}
