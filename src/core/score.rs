//! Score Tracker: correct answers vs. attempts

use crate::types::ScoreRecord;

/// Running score for one session
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    record: ScoreRecord,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished round
    pub fn record_outcome(&mut self, success: bool) {
        self.record.attempts += 1;
        if success {
            self.record.correct += 1;
        }
    }

    /// Read-only view for display
    pub fn snapshot(&self) -> ScoreRecord {
        self.record
    }

    /// Back to {0, 0}
    pub fn reset(&mut self) {
        self.record = ScoreRecord::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(ScoreTracker::new().snapshot(), ScoreRecord::new(0, 0));
    }

    #[test]
    fn test_success_increments_both() {
        let mut tracker = ScoreTracker::new();
        tracker.record_outcome(true);
        assert_eq!(tracker.snapshot(), ScoreRecord::new(1, 1));
    }

    #[test]
    fn test_failure_increments_attempts_only() {
        let mut tracker = ScoreTracker::new();
        tracker.record_outcome(false);
        assert_eq!(tracker.snapshot(), ScoreRecord::new(0, 1));
    }

    #[test]
    fn test_attempts_never_below_correct() {
        let mut tracker = ScoreTracker::new();
        for i in 0..50 {
            tracker.record_outcome(i % 3 != 0);
            let s = tracker.snapshot();
            assert!(s.attempts >= s.correct);
        }
        assert_eq!(tracker.snapshot().attempts, 50);
    }

    #[test]
    fn test_reset() {
        let mut tracker = ScoreTracker::new();
        tracker.record_outcome(true);
        tracker.reset();
        assert_eq!(tracker.snapshot(), ScoreRecord::default());
    }
}
