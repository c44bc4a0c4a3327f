use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::parser::{Attempts, GuessGrid};
use crate::shared::AppError;

/// A tracked player. The id is the platform-assigned user id; the display
/// name follows whatever the platform last reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerModel {
    pub id: String,
    pub display_name: String,
}

/// A candidate result ready for the dedup check, produced by the ingestion
/// pipeline from a parsed share or a resolved streak entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResult {
    pub player_id: String,
    pub guild_id: String,
    pub puzzle_number: u32,
    pub attempts: Attempts,
    /// Present for share-text results; streak-summary lines carry no grid.
    pub guess_grid: Option<GuessGrid>,
    pub submitted_at: DateTime<Utc>,
    pub raw_text: String,
}

impl NewResult {
    /// Consistency checks the store runs before persisting anything.
    /// A violation here is a bug in the caller, not bad user input.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.puzzle_number == 0 {
            return Err(AppError::InvariantViolation(
                "puzzle number must be positive".to_string(),
            ));
        }

        if let Some(grid) = &self.guess_grid {
            if !grid.is_uniform() {
                return Err(AppError::InvariantViolation(format!(
                    "guess grid for puzzle {} has ragged rows",
                    self.puzzle_number
                )));
            }

            let expected = self.attempts.expected_rows();
            if grid.row_count() != expected {
                return Err(AppError::InvariantViolation(format!(
                    "guess grid for puzzle {} has {} rows, expected {}",
                    self.puzzle_number,
                    grid.row_count(),
                    expected
                )));
            }
        }

        Ok(())
    }
}

/// An immutable, persisted result. Never mutated or deleted once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResult {
    pub player_id: String,
    pub guild_id: String,
    pub puzzle_number: u32,
    pub attempts: Attempts,
    pub guess_grid: Option<GuessGrid>,
    pub submitted_at: DateTime<Utc>,
    pub raw_text: String,
}

impl From<NewResult> for StoredResult {
    fn from(candidate: NewResult) -> Self {
        Self {
            player_id: candidate.player_id,
            guild_id: candidate.guild_id,
            puzzle_number: candidate.puzzle_number,
            attempts: candidate.attempts,
            guess_grid: candidate.guess_grid,
            submitted_at: candidate.submitted_at,
            raw_text: candidate.raw_text,
        }
    }
}

/// Options for a history page: most recent first, optionally bounded by an
/// attempts range. Failed puzzles rank as 7 for filtering, so `max_attempts`
/// of 6 excludes them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub guild_id: Option<String>,
    pub limit: Option<usize>,
    pub min_attempts: Option<u8>,
    pub max_attempts: Option<u8>,
}

impl HistoryQuery {
    pub fn validate(&self) -> Result<(), AppError> {
        if let (Some(min), Some(max)) = (self.min_attempts, self.max_attempts) {
            if min > max {
                return Err(AppError::BadRequest(
                    "Minimum attempts must be less than maximum attempts".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Applies the filter to a puzzle-number-ascending history, returning
    /// the most recent matching entries first.
    pub fn apply(&self, history: Vec<StoredResult>) -> Vec<StoredResult> {
        let mut page: Vec<StoredResult> = history
            .into_iter()
            .rev()
            .filter(|result| {
                let rank = result.attempts.filter_rank();
                self.min_attempts.is_none_or(|min| rank >= min)
                    && self.max_attempts.is_none_or(|max| rank <= max)
            })
            .collect();

        if let Some(limit) = self.limit {
            page.truncate(limit);
        }

        page
    }
}
