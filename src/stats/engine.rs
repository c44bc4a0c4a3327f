use crate::parser::Attempts;
use crate::results::StoredResult;

use super::models::{AttemptsDistribution, StatsSnapshot};
use super::scoring::ScoringConfig;

/// Computes a full snapshot from a puzzle-number-ascending history.
///
/// Streak rules: a win on the puzzle immediately after the previously seen
/// puzzle extends the running streak; a win after a gap or after a fail
/// starts a new streak of 1; a fail resets the running streak to 0. The
/// best streak is the maximum the running streak ever reached.
///
/// Pure function of its input; recomputed in full on every call.
pub fn compute(history: &[StoredResult], scoring: &ScoringConfig) -> StatsSnapshot {
    let mut distribution = AttemptsDistribution::default();
    let mut wins: u32 = 0;
    let mut attempts_sum: u32 = 0;
    let mut points: i64 = 0;

    let mut current_streak: u32 = 0;
    let mut best_streak: u32 = 0;
    let mut previous_puzzle: Option<u32> = None;

    for result in history {
        distribution.record(result.attempts);
        points += scoring.score(result.attempts);

        match result.attempts {
            Attempts::Solved(count) => {
                wins += 1;
                attempts_sum += count as u32;

                let adjacent = previous_puzzle
                    .is_some_and(|previous| previous + 1 == result.puzzle_number);
                current_streak = if adjacent { current_streak + 1 } else { 1 };
                best_streak = best_streak.max(current_streak);
            }
            Attempts::Failed => current_streak = 0,
        }

        previous_puzzle = Some(result.puzzle_number);
    }

    let total_games = history.len() as u32;
    let win_rate = if total_games == 0 {
        0.0
    } else {
        f64::from(wins) / f64::from(total_games)
    };
    let mean_attempts = if wins == 0 {
        None
    } else {
        Some(f64::from(attempts_sum) / f64::from(wins))
    };

    StatsSnapshot {
        total_games,
        wins,
        fails: distribution.failed,
        distribution,
        win_rate,
        current_streak,
        best_streak,
        mean_attempts,
        points,
    }
}
