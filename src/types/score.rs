//! Score record

use serde::{Deserialize, Serialize};

/// Cumulative result of a session: `attempts >= correct` always holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub correct: u32,
    pub attempts: u32,
}

impl ScoreRecord {
    pub fn new(correct: u32, attempts: u32) -> Self {
        Self { correct, attempts }
    }

    /// Fraction of rounds won, 0.0 before the first attempt
    pub fn ratio(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.correct as f64 / self.attempts as f64
        }
    }
}

impl std::fmt::Display for ScoreRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Score: {} / {}", self.correct, self.attempts)
    }
}
