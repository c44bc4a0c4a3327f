use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::{NewResult, PlayerModel, StoredResult};
use crate::parser::{Attempts, GuessGrid};
use crate::shared::AppError;

/// Outcome of the dedup-checked insert
#[derive(Debug, Clone)]
pub enum UpsertOutcome {
    /// First submission for this (player, guild, puzzle) key; the result is
    /// now durable.
    Accepted(StoredResult),
    /// A result already exists for the key. The stored record is untouched.
    Duplicate,
}

/// Trait for result storage operations
///
/// `upsert` is the correctness-critical operation: it must be atomic with
/// respect to the dedup key so that concurrent submissions of the same
/// (player, guild, puzzle) yield exactly one `Accepted`.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    async fn upsert(&self, candidate: NewResult) -> Result<UpsertOutcome, AppError>;

    /// A player's results ordered by puzzle number ascending; cross-guild
    /// when `guild_id` is `None`.
    async fn history(
        &self,
        player_id: &str,
        guild_id: Option<&str>,
    ) -> Result<Vec<StoredResult>, AppError>;

    /// Distinct player ids observed in a guild's results, sorted.
    async fn members(&self, guild_id: &str) -> Result<Vec<String>, AppError>;

    /// Creates or renames a player; the last-seen display name wins.
    async fn upsert_player(&self, id: &str, display_name: &str) -> Result<(), AppError>;

    async fn get_player(&self, id: &str) -> Result<Option<PlayerModel>, AppError>;

    async fn count_results(&self) -> Result<u64, AppError>;

    /// Number of distinct puzzles with at least one recorded result.
    async fn count_puzzles(&self) -> Result<u64, AppError>;
}

type DedupKey = (String, String, u32);

#[derive(Default)]
struct InMemoryState {
    results: BTreeMap<DedupKey, StoredResult>,
    players: HashMap<String, PlayerModel>,
}

/// In-memory implementation of ResultRepository for development and testing
///
/// A single mutex guards the whole store, so the entry-based upsert gives
/// the same exactly-one-accepted guarantee the database uniqueness
/// constraint provides in production.
pub struct InMemoryResultRepository {
    state: Mutex<InMemoryState>,
}

impl Default for InMemoryResultRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryResultRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(InMemoryState::default()),
        }
    }

    /// Current number of stored results (useful for debugging)
    pub fn result_count(&self) -> usize {
        self.state.lock().unwrap().results.len()
    }
}

#[async_trait]
impl ResultRepository for InMemoryResultRepository {
    #[instrument(skip(self, candidate), fields(player_id = %candidate.player_id, puzzle = candidate.puzzle_number))]
    async fn upsert(&self, candidate: NewResult) -> Result<UpsertOutcome, AppError> {
        candidate.validate()?;

        let key = (
            candidate.player_id.clone(),
            candidate.guild_id.clone(),
            candidate.puzzle_number,
        );

        let mut state = self.state.lock().unwrap();
        match state.results.entry(key) {
            Entry::Occupied(_) => {
                debug!("Result already exists, keeping first submission");
                Ok(UpsertOutcome::Duplicate)
            }
            Entry::Vacant(slot) => {
                let stored = StoredResult::from(candidate);
                slot.insert(stored.clone());
                debug!("Result stored in memory");
                Ok(UpsertOutcome::Accepted(stored))
            }
        }
    }

    #[instrument(skip(self))]
    async fn history(
        &self,
        player_id: &str,
        guild_id: Option<&str>,
    ) -> Result<Vec<StoredResult>, AppError> {
        let state = self.state.lock().unwrap();
        let mut history: Vec<StoredResult> = state
            .results
            .values()
            .filter(|result| {
                result.player_id == player_id
                    && guild_id.is_none_or(|guild| result.guild_id == guild)
            })
            .cloned()
            .collect();

        history.sort_by_key(|result| result.puzzle_number);
        Ok(history)
    }

    #[instrument(skip(self))]
    async fn members(&self, guild_id: &str) -> Result<Vec<String>, AppError> {
        let state = self.state.lock().unwrap();
        let members: BTreeSet<String> = state
            .results
            .values()
            .filter(|result| result.guild_id == guild_id)
            .map(|result| result.player_id.clone())
            .collect();

        Ok(members.into_iter().collect())
    }

    #[instrument(skip(self))]
    async fn upsert_player(&self, id: &str, display_name: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state.players.insert(
            id.to_string(),
            PlayerModel {
                id: id.to_string(),
                display_name: display_name.to_string(),
            },
        );

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_player(&self, id: &str) -> Result<Option<PlayerModel>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.players.get(id).cloned())
    }

    async fn count_results(&self) -> Result<u64, AppError> {
        Ok(self.state.lock().unwrap().results.len() as u64)
    }

    async fn count_puzzles(&self) -> Result<u64, AppError> {
        let state = self.state.lock().unwrap();
        let puzzles: BTreeSet<u32> = state
            .results
            .values()
            .map(|result| result.puzzle_number)
            .collect();

        Ok(puzzles.len() as u64)
    }
}

/// PostgreSQL implementation of the result repository
///
/// The dedup guarantee rides on the primary key over
/// (player_id, guild_id, puzzle_number): the conditional insert either
/// affects one row (Accepted) or zero (Duplicate), never overwrites.
pub struct PostgresResultRepository {
    pool: PgPool,
}

impl PostgresResultRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &sqlx::postgres::PgRow) -> Result<StoredResult, AppError> {
        let puzzle_number: i64 = row.get("puzzle_number");
        let attempts_code: i16 = row.get("attempts");
        let attempts = Attempts::from_db_code(attempts_code).ok_or_else(|| {
            AppError::InvariantViolation(format!(
                "stored attempts code {} is out of range",
                attempts_code
            ))
        })?;

        let guess_grid = match row.get::<Option<String>, _>("guess_grid") {
            Some(encoded) => Some(GuessGrid::from_compact(&encoded).ok_or_else(|| {
                AppError::InvariantViolation(format!(
                    "stored guess grid {:?} does not decode",
                    encoded
                ))
            })?),
            None => None,
        };

        Ok(StoredResult {
            player_id: row.get("player_id"),
            guild_id: row.get("guild_id"),
            puzzle_number: puzzle_number as u32,
            attempts,
            guess_grid,
            submitted_at: row.get("submitted_at"),
            raw_text: row.get("raw_text"),
        })
    }
}

#[async_trait]
impl ResultRepository for PostgresResultRepository {
    #[instrument(skip(self, candidate), fields(player_id = %candidate.player_id, puzzle = candidate.puzzle_number))]
    async fn upsert(&self, candidate: NewResult) -> Result<UpsertOutcome, AppError> {
        candidate.validate()?;

        debug!("Inserting result if absent");

        let result = sqlx::query(
            "INSERT INTO wordle_results \
             (player_id, guild_id, puzzle_number, attempts, guess_grid, submitted_at, raw_text) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (player_id, guild_id, puzzle_number) DO NOTHING",
        )
        .bind(&candidate.player_id)
        .bind(&candidate.guild_id)
        .bind(candidate.puzzle_number as i64)
        .bind(candidate.attempts.db_code())
        .bind(candidate.guess_grid.as_ref().map(GuessGrid::to_compact))
        .bind(candidate.submitted_at)
        .bind(&candidate.raw_text)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to insert result");
            AppError::StorageUnavailable(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            debug!("Result already exists, keeping first submission");
            return Ok(UpsertOutcome::Duplicate);
        }

        debug!("Result stored in database");
        Ok(UpsertOutcome::Accepted(StoredResult::from(candidate)))
    }

    #[instrument(skip(self))]
    async fn history(
        &self,
        player_id: &str,
        guild_id: Option<&str>,
    ) -> Result<Vec<StoredResult>, AppError> {
        debug!("Fetching result history");

        let rows = match guild_id {
            Some(guild) => {
                sqlx::query(
                    "SELECT player_id, guild_id, puzzle_number, attempts, guess_grid, \
                     submitted_at, raw_text \
                     FROM wordle_results WHERE player_id = $1 AND guild_id = $2 \
                     ORDER BY puzzle_number ASC",
                )
                .bind(player_id)
                .bind(guild)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    "SELECT player_id, guild_id, puzzle_number, attempts, guess_grid, \
                     submitted_at, raw_text \
                     FROM wordle_results WHERE player_id = $1 \
                     ORDER BY puzzle_number ASC",
                )
                .bind(player_id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch history");
            AppError::StorageUnavailable(e.to_string())
        })?;

        rows.iter().map(Self::map_row).collect()
    }

    #[instrument(skip(self))]
    async fn members(&self, guild_id: &str) -> Result<Vec<String>, AppError> {
        debug!("Fetching guild members");

        let rows = sqlx::query(
            "SELECT DISTINCT player_id FROM wordle_results \
             WHERE guild_id = $1 ORDER BY player_id ASC",
        )
        .bind(guild_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch guild members");
            AppError::StorageUnavailable(e.to_string())
        })?;

        Ok(rows.iter().map(|row| row.get("player_id")).collect())
    }

    #[instrument(skip(self))]
    async fn upsert_player(&self, id: &str, display_name: &str) -> Result<(), AppError> {
        debug!("Upserting player");

        sqlx::query(
            "INSERT INTO players (id, display_name) VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET display_name = EXCLUDED.display_name",
        )
        .bind(id)
        .bind(display_name)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to upsert player");
            AppError::StorageUnavailable(e.to_string())
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_player(&self, id: &str) -> Result<Option<PlayerModel>, AppError> {
        let row = sqlx::query("SELECT id, display_name FROM players WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to fetch player");
                AppError::StorageUnavailable(e.to_string())
            })?;

        Ok(row.map(|row| PlayerModel {
            id: row.get("id"),
            display_name: row.get("display_name"),
        }))
    }

    #[instrument(skip(self))]
    async fn count_results(&self) -> Result<u64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM wordle_results")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to count results");
                AppError::StorageUnavailable(e.to_string())
            })?;

        Ok(row.get::<i64, _>("count") as u64)
    }

    #[instrument(skip(self))]
    async fn count_puzzles(&self) -> Result<u64, AppError> {
        let row = sqlx::query("SELECT COUNT(DISTINCT puzzle_number) AS count FROM wordle_results")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to count puzzles");
                AppError::StorageUnavailable(e.to_string())
            })?;

        Ok(row.get::<i64, _>("count") as u64)
    }
}
