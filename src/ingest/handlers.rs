use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::events::{ImportSummary, MessageEvent, ResolvedStreakEntry};
use super::service::{IngestOutcome, IngestService};
use crate::results::StoredResult;
use crate::shared::{AppError, AppState};

/// Wire shape for an ingestion outcome.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<StoredResult>,
}

impl From<IngestOutcome> for IngestResponse {
    fn from(outcome: IngestOutcome) -> Self {
        match outcome {
            IngestOutcome::Recorded(result) => Self {
                status: "recorded",
                reason: None,
                result: Some(result),
            },
            IngestOutcome::Ignored(reason) => Self {
                status: "ignored",
                reason: Some(reason.as_str()),
                result: None,
            },
        }
    }
}

/// HTTP handler delivering one inbound chat message event
///
/// POST /events
#[instrument(name = "ingest_event", skip(state, event))]
pub async fn ingest_event(
    State(state): State<AppState>,
    Json(event): Json<MessageEvent>,
) -> Result<Json<IngestResponse>, AppError> {
    let service = IngestService::new(Arc::clone(&state.result_repository));
    let outcome = service.handle(&event).await?;

    Ok(Json(IngestResponse::from(outcome)))
}

/// HTTP handler importing a fetched message history in one call
///
/// POST /events/batch
#[instrument(name = "ingest_batch", skip(state, events))]
pub async fn ingest_batch(
    State(state): State<AppState>,
    Json(events): Json<Vec<MessageEvent>>,
) -> Result<Json<ImportSummary>, AppError> {
    let service = IngestService::new(Arc::clone(&state.result_repository));
    let summary = service.import_batch(&events).await?;

    info!(
        scanned = summary.scanned,
        recorded = summary.recorded,
        "Batch import handled"
    );
    Ok(Json(summary))
}

/// A streak summary whose mentions the collaborator has already resolved.
#[derive(Debug, Deserialize)]
pub struct StreakImportRequest {
    pub guild_id: String,
    pub puzzle_number: u32,
    pub sent_at: DateTime<Utc>,
    pub raw_text: String,
    pub entries: Vec<ResolvedStreakEntry>,
}

/// HTTP handler committing resolved streak-summary entries
///
/// POST /streaks
#[instrument(name = "import_streak", skip(state, request))]
pub async fn import_streak(
    State(state): State<AppState>,
    Json(request): Json<StreakImportRequest>,
) -> Result<Json<Vec<IngestResponse>>, AppError> {
    let service = IngestService::new(Arc::clone(&state.result_repository));
    let outcomes = service
        .import_streak(
            &request.guild_id,
            request.puzzle_number,
            request.sent_at,
            &request.raw_text,
            &request.entries,
        )
        .await?;

    Ok(Json(outcomes.into_iter().map(IngestResponse::from).collect()))
}
