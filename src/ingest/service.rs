use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::events::{ImportSummary, MessageEvent, ResolvedStreakEntry};
use crate::parser::{classify, MessageKind, ParsedShare};
use crate::results::{NewResult, ResultRepository, StoredResult, UpsertOutcome};
use crate::shared::AppError;

/// Why an event produced no stored result. Expected and frequent; none of
/// these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The text is not a recognizable share.
    NotAResult,
    /// A result already exists for this (player, guild, puzzle).
    Duplicate,
    /// A streak summary was recognized but its mentions must be resolved by
    /// the collaborator before entries can be recorded.
    StreakNeedsResolution,
}

impl IgnoreReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IgnoreReason::NotAResult => "not_a_result",
            IgnoreReason::Duplicate => "duplicate",
            IgnoreReason::StreakNeedsResolution => "streak_needs_resolution",
        }
    }
}

/// Outcome of handling one inbound event.
#[derive(Debug, Clone)]
pub enum IngestOutcome {
    Recorded(StoredResult),
    Ignored(IgnoreReason),
}

impl IngestOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, IngestOutcome::Recorded(_))
    }
}

/// Service gluing the parser to the result store. Performs no retries:
/// storage failures propagate to the caller, which may redeliver the whole
/// event since ingestion is idempotent on the dedup key.
pub struct IngestService {
    repository: Arc<dyn ResultRepository>,
}

impl IngestService {
    pub fn new(repository: Arc<dyn ResultRepository>) -> Self {
        Self { repository }
    }

    /// Handles one inbound message event: exactly one durable write when
    /// the outcome is `Recorded`, none otherwise.
    #[instrument(skip(self, event), fields(author_id = %event.author_id, guild_id = %event.guild_id))]
    pub async fn handle(&self, event: &MessageEvent) -> Result<IngestOutcome, AppError> {
        match classify(&event.text) {
            MessageKind::NotAResult => {
                debug!("Message is not a Wordle result");
                Ok(IngestOutcome::Ignored(IgnoreReason::NotAResult))
            }
            MessageKind::Streak(report) => {
                debug!(
                    entries = report.entries.len(),
                    day_streak = report.day_streak,
                    "Streak summary requires identity resolution"
                );
                Ok(IngestOutcome::Ignored(IgnoreReason::StreakNeedsResolution))
            }
            MessageKind::Share(share) => self.record_share(event, share).await,
        }
    }

    /// Runs `handle` over a fetched message history, tallying how many new
    /// results were recorded.
    #[instrument(skip(self, events), fields(events = events.len()))]
    pub async fn import_batch(&self, events: &[MessageEvent]) -> Result<ImportSummary, AppError> {
        let mut summary = ImportSummary::default();

        for event in events {
            summary.scanned += 1;
            if self.handle(event).await?.is_recorded() {
                summary.recorded += 1;
            }
        }

        info!(
            scanned = summary.scanned,
            recorded = summary.recorded,
            "Import finished"
        );
        Ok(summary)
    }

    /// Commits streak-summary entries once the collaborator has resolved
    /// mentions into player ids and pinned the puzzle number. Entries carry
    /// no guess grid.
    #[instrument(skip(self, entries, raw_text), fields(entries = entries.len()))]
    pub async fn import_streak(
        &self,
        guild_id: &str,
        puzzle_number: u32,
        sent_at: DateTime<Utc>,
        raw_text: &str,
        entries: &[ResolvedStreakEntry],
    ) -> Result<Vec<IngestOutcome>, AppError> {
        let mut outcomes = Vec::with_capacity(entries.len());

        for entry in entries {
            self.repository
                .upsert_player(&entry.player_id, entry.display_name())
                .await?;

            let candidate = NewResult {
                player_id: entry.player_id.clone(),
                guild_id: guild_id.to_string(),
                puzzle_number,
                attempts: entry.attempts,
                guess_grid: None,
                submitted_at: sent_at,
                raw_text: raw_text.to_string(),
            };

            let outcome = match self.repository.upsert(candidate).await? {
                UpsertOutcome::Accepted(stored) => {
                    info!(player_id = %stored.player_id, "Recorded streak entry");
                    IngestOutcome::Recorded(stored)
                }
                UpsertOutcome::Duplicate => IngestOutcome::Ignored(IgnoreReason::Duplicate),
            };
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    async fn record_share(
        &self,
        event: &MessageEvent,
        share: ParsedShare,
    ) -> Result<IngestOutcome, AppError> {
        self.repository
            .upsert_player(&event.author_id, event.display_name())
            .await?;

        let candidate = NewResult {
            player_id: event.author_id.clone(),
            guild_id: event.guild_id.clone(),
            puzzle_number: share.puzzle_number,
            attempts: share.attempts,
            guess_grid: Some(share.grid),
            submitted_at: event.sent_at,
            raw_text: event.text.clone(),
        };

        match self.repository.upsert(candidate).await? {
            UpsertOutcome::Accepted(stored) => {
                info!(
                    puzzle = stored.puzzle_number,
                    attempts = %stored.attempts,
                    "Recorded result"
                );
                Ok(IngestOutcome::Recorded(stored))
            }
            UpsertOutcome::Duplicate => {
                debug!(puzzle = share.puzzle_number, "Duplicate submission ignored");
                Ok(IngestOutcome::Ignored(IgnoreReason::Duplicate))
            }
        }
    }
}
