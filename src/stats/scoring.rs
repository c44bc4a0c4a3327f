use crate::parser::Attempts;

/// Points awarded per attempts bucket. Quicker solves are worth more and a
/// failed puzzle costs points. Values can be overridden per deployment via
/// `WORDLE_POINTS_ATTEMPTS_1` .. `WORDLE_POINTS_ATTEMPTS_6` and
/// `WORDLE_POINTS_FAIL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    pub solved: [i64; 6],
    pub fail: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            solved: [10, 5, 4, 3, 2, 1],
            fail: -5,
        }
    }
}

impl ScoringConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        for (index, slot) in config.solved.iter_mut().enumerate() {
            let name = format!("WORDLE_POINTS_ATTEMPTS_{}", index + 1);
            if let Some(value) = read_env_points(&name) {
                *slot = value;
            }
        }

        if let Some(value) = read_env_points("WORDLE_POINTS_FAIL") {
            config.fail = value;
        }

        config
    }

    pub fn score(&self, attempts: Attempts) -> i64 {
        match attempts {
            Attempts::Solved(count) => self.solved[(count.clamp(1, 6) as usize) - 1],
            Attempts::Failed => self.fail,
        }
    }
}

fn read_env_points(name: &str) -> Option<i64> {
    std::env::var(name).ok().and_then(|raw| raw.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scoring_rewards_quick_solves() {
        let scoring = ScoringConfig::default();

        assert_eq!(scoring.score(Attempts::Solved(1)), 10);
        assert_eq!(scoring.score(Attempts::Solved(3)), 4);
        assert_eq!(scoring.score(Attempts::Solved(6)), 1);
        assert_eq!(scoring.score(Attempts::Failed), -5);
    }
}
