// Library crate for the Wordcade result tracking server
// This file exposes the public API for integration tests

pub mod ingest;
pub mod parser;
pub mod results;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use ingest::{IgnoreReason, IngestOutcome, IngestService, MessageEvent, ResolvedStreakEntry};
pub use parser::{classify, parse_share, parse_streak, Attempts, MessageKind};
pub use results::{HistoryQuery, InMemoryResultRepository, ResultRepository, UpsertOutcome};
pub use shared::{AppError, AppState};
pub use stats::{
    LeaderboardBuilder, LeaderboardMetric, ScoringConfig, StatsService, StatsSnapshot,
};
