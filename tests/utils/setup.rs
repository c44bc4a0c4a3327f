use std::sync::Arc;

use wordcade::{
    IngestService, InMemoryResultRepository, LeaderboardBuilder, ScoringConfig, StatsService,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub repository: Arc<InMemoryResultRepository>,
    pub ingest: IngestService,
    pub stats: StatsService,
    pub leaderboard: LeaderboardBuilder,
}

impl TestSetup {
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryResultRepository::new());
        let scoring = ScoringConfig::default();

        Self {
            ingest: IngestService::new(repository.clone()),
            stats: StatsService::new(repository.clone(), scoring.clone()),
            leaderboard: LeaderboardBuilder::new(repository.clone(), scoring),
            repository,
        }
    }
}

impl Default for TestSetup {
    fn default() -> Self {
        Self::new()
    }
}
