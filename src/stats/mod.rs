pub mod handlers;

mod engine;
mod leaderboard;
mod models;
mod scoring;
mod service;

pub use engine::compute;
pub use leaderboard::{LeaderboardBuilder, LeaderboardMetric, LeaderboardRow, LeaderboardTable};
pub use models::{AttemptsDistribution, PlayerCard, StatsSnapshot};
pub use scoring::ScoringConfig;
pub use service::StatsService;
