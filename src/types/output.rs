//! Output of a single `advance` call

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{EmojiCode, GameState, ReasonCode, RenderDirective, ScoreRecord};

/// Everything one processed frame produced.
///
/// Equality ignores `timestamp`: two engines fed the same frames produce
/// equal outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Processed-frame index passed to `advance`
    pub frame: u64,
    /// State after the call
    pub state: GameState,
    /// What happened on this call
    pub reason: ReasonCode,
    /// Text to draw for this frame, if any
    pub directive: Option<RenderDirective>,
    /// Target drawn on this call (Mimic entry)
    pub new_target: Option<EmojiCode>,
    /// Score after a Success/Failure entry
    pub score_update: Option<ScoreRecord>,
}

impl PartialEq for FrameOutput {
    fn eq(&self, other: &Self) -> bool {
        self.frame == other.frame
            && self.state == other.state
            && self.reason == other.reason
            && self.directive == other.directive
            && self.new_target == other.new_target
            && self.score_update == other.score_update
    }
}

impl FrameOutput {
    /// Create new output
    pub fn new(frame: u64, state: GameState, reason: ReasonCode) -> Self {
        Self {
            timestamp: Utc::now(),
            frame,
            state,
            reason,
            directive: None,
            new_target: None,
            score_update: None,
        }
    }

    pub fn with_directive(mut self, directive: Option<RenderDirective>) -> Self {
        self.directive = directive;
        self
    }

    pub fn with_target(mut self, target: Option<EmojiCode>) -> Self {
        self.new_target = target;
        self
    }

    pub fn with_score(mut self, score: Option<ScoreRecord>) -> Self {
        self.score_update = score;
        self
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.state.color_code();
        let reset = GameState::color_reset();
        let emoji = self.state.emoji();

        format!(
            "{}{} frame={} | state={} | {} | {}{}",
            color,
            emoji,
            self.frame,
            self.state,
            self.directive.as_ref().map(|d| d.text.as_str()).unwrap_or("-"),
            self.reason.code(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "frame={} | state={} | text={} | reason={}",
            self.frame,
            self.state,
            self.directive.as_ref().map(|d| d.text.as_str()).unwrap_or("-"),
            self.reason.code()
        )
    }
}
