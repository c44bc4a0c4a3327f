use serde::{Deserialize, Serialize};

use crate::parser::Attempts;

/// Counts of results per attempts bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptsDistribution {
    /// Index 0 holds one-attempt solves ("aces"), index 5 six-attempt
    /// solves.
    pub solved: [u32; 6],
    pub failed: u32,
}

impl AttemptsDistribution {
    pub fn record(&mut self, attempts: Attempts) {
        match attempts {
            Attempts::Solved(count) => {
                let index = (count.clamp(1, 6) as usize) - 1;
                self.solved[index] += 1;
            }
            Attempts::Failed => self.failed += 1,
        }
    }

    /// One-attempt solves.
    pub fn aces(&self) -> u32 {
        self.solved[0]
    }
}

/// Derived statistics over one player's ordered result history. Computed on
/// demand, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_games: u32,
    pub wins: u32,
    pub fails: u32,
    pub distribution: AttemptsDistribution,
    /// wins / total_games; 0 when no games.
    pub win_rate: f64,
    pub current_streak: u32,
    pub best_streak: u32,
    /// Mean attempts among winning results only; `None` when there are no
    /// wins.
    pub mean_attempts: Option<f64>,
    /// Accumulated points under the configured scoring.
    pub points: i64,
}

/// Reply payload for a player statistics request; the chat-platform
/// collaborator renders it into platform markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerCard {
    pub player_id: String,
    pub display_name: String,
    pub snapshot: StatsSnapshot,
    /// Distinct puzzles with at least one recorded result, across all
    /// players.
    pub total_puzzles: u64,
}
