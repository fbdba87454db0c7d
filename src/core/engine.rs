//! Game Engine: frame-driven state machine
//!
//! State transitions (all durations in processed frames):
//! - INIT → GET_READY: first frame
//! - GET_READY → MIMIC: 30-frame banner finished
//! - MIMIC → SUCCESS: target matched on 3 consecutive frames
//! - MIMIC → FAILURE: 100-frame budget exhausted
//! - SUCCESS / FAILURE → MIMIC: 30-frame banner finished, new target drawn
//!
//! The round context only exists while in MIMIC; leaving MIMIC drops it.

use tracing::{debug, info};

use crate::core::{RoundSelector, ScoreTracker};
use crate::types::{
    ClassificationResult, EmojiCode, FillColor, FrameOutput, GameState, Position, ReasonCode,
    RenderDirective, ScoreRecord,
};
use crate::{GameConfig, BANNER_X, BANNER_Y};

/// The round being played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundContext {
    /// Emoji the player has to mimic
    pub target: EmojiCode,
    /// Does the current expression match the target?
    pub is_sensing: bool,
    /// Matching frames still needed; `None` while not sensing
    pub confirm_remaining: Option<u32>,
}

impl RoundContext {
    fn new(target: EmojiCode) -> Self {
        Self {
            target,
            is_sensing: false,
            confirm_remaining: None,
        }
    }

    fn clear_sensing(&mut self) {
        self.is_sensing = false;
        self.confirm_remaining = None;
    }
}

/// Presentation pacing for the current state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationTimer {
    /// Frame on which the current state was entered
    pub start_frame: Option<u64>,
    /// Banner frames left; `None` when no banner is running
    pub remaining: Option<u32>,
}

impl AnimationTimer {
    fn started(frame: u64, duration: u32) -> Self {
        Self {
            start_frame: Some(frame),
            remaining: Some(duration),
        }
    }

    fn unset(frame: u64) -> Self {
        Self {
            start_frame: Some(frame),
            remaining: None,
        }
    }
}

/// Mimic Me! state machine
#[derive(Debug)]
pub struct GameEngine {
    config: GameConfig,
    selector: RoundSelector,
    /// Current state
    state: GameState,
    /// Active round, present only in MIMIC
    round: Option<RoundContext>,
    timer: AnimationTimer,
    score: ScoreTracker,
    /// Number of `advance` calls since the last reset
    advance_count: u64,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GameEngine {
    /// Create new engine; target selection is seeded from `config.seed`
    pub fn new(config: GameConfig) -> Self {
        Self::with_selector(config, RoundSelector::from_seed(config.seed))
    }

    /// Create new engine with an explicit random source
    pub fn with_selector(config: GameConfig, selector: RoundSelector) -> Self {
        Self {
            config,
            selector,
            state: GameState::Init,
            round: None,
            timer: AnimationTimer::default(),
            score: ScoreTracker::new(),
            advance_count: 0,
        }
    }

    /// Consume one classification result, return what this frame produced
    pub fn advance(&mut self, frame: u64, result: &ClassificationResult) -> FrameOutput {
        self.advance_count += 1;

        match self.state {
            GameState::Init => {
                self.enter_get_ready(frame);
                FrameOutput::new(frame, self.state, ReasonCode::G003_TRANSITION_TO_GET_READY)
            }
            GameState::GetReady => self.advance_banner(frame, ReasonCode::G001_GET_READY_COUNTDOWN),
            GameState::Mimic => self.advance_mimic(frame, result),
            GameState::Success => self.advance_banner(frame, ReasonCode::G001_SUCCESS_COUNTDOWN),
            GameState::Failure => self.advance_banner(frame, ReasonCode::G001_FAILURE_COUNTDOWN),
        }
    }

    /// GET_READY, SUCCESS and FAILURE: count the banner down, then start a round
    fn advance_banner(&mut self, frame: u64, counting: ReasonCode) -> FrameOutput {
        let directive = banner_directive(self.state);
        let remaining = self
            .timer
            .remaining
            .unwrap_or(self.config.animation_frames)
            .saturating_sub(1);
        self.timer.remaining = Some(remaining);

        if remaining > 0 {
            return FrameOutput::new(frame, self.state, counting).with_directive(directive);
        }

        let target = self.enter_mimic(frame);
        FrameOutput::new(frame, self.state, ReasonCode::G003_TRANSITION_TO_MIMIC)
            .with_directive(directive)
            .with_target(Some(target))
    }

    /// MIMIC: check the time budget, then the expression
    fn advance_mimic(&mut self, frame: u64, result: &ClassificationResult) -> FrameOutput {
        let time_to_go = self.time_to_go(frame).unwrap_or(0);
        if time_to_go <= 0 {
            let score = self.enter_failure(frame);
            return FrameOutput::new(frame, self.state, ReasonCode::G003_TRANSITION_TO_FAILURE)
                .with_score(Some(score));
        }

        let directive = countdown_directive(time_to_go);
        let observed = result.dominant_code();
        let confirm_frames = self.config.confirm_frames;

        let Some(round) = self.round.as_mut() else {
            // MIMIC is only ever entered through enter_mimic
            let target = self.enter_mimic(frame);
            return FrameOutput::new(frame, self.state, ReasonCode::G003_TRANSITION_TO_MIMIC)
                .with_target(Some(target));
        };

        if observed != round.target {
            round.clear_sensing();
            return FrameOutput::new(frame, self.state, ReasonCode::G002_NO_MATCH)
                .with_directive(Some(directive));
        }

        let reason = if round.is_sensing {
            ReasonCode::G002_MATCH_CONFIRMING
        } else {
            round.is_sensing = true;
            ReasonCode::G002_MATCH_STARTED
        };
        let remaining = round
            .confirm_remaining
            .unwrap_or(confirm_frames)
            .saturating_sub(1);
        round.confirm_remaining = Some(remaining);

        if remaining > 0 {
            return FrameOutput::new(frame, self.state, reason).with_directive(Some(directive));
        }

        let score = self.enter_success(frame);
        FrameOutput::new(frame, self.state, ReasonCode::G003_TRANSITION_TO_SUCCESS)
            .with_directive(Some(directive))
            .with_score(Some(score))
    }

    fn enter_get_ready(&mut self, frame: u64) {
        debug!(frame, "entering GET_READY");
        self.state = GameState::GetReady;
        self.timer = AnimationTimer::started(frame, self.config.animation_frames);
    }

    fn enter_mimic(&mut self, frame: u64) -> EmojiCode {
        let target = self.selector.pick_target();
        debug!(frame, target = target.value(), "entering MIMIC");
        self.state = GameState::Mimic;
        self.round = Some(RoundContext::new(target));
        self.timer = AnimationTimer::unset(frame);
        target
    }

    fn enter_success(&mut self, frame: u64) -> ScoreRecord {
        self.score.record_outcome(true);
        let score = self.score.snapshot();
        info!(frame, correct = score.correct, attempts = score.attempts, "round won");
        self.finish_round(GameState::Success, frame);
        score
    }

    fn enter_failure(&mut self, frame: u64) -> ScoreRecord {
        self.score.record_outcome(false);
        let score = self.score.snapshot();
        info!(frame, correct = score.correct, attempts = score.attempts, "round lost");
        self.finish_round(GameState::Failure, frame);
        score
    }

    fn finish_round(&mut self, state: GameState, frame: u64) {
        self.state = state;
        self.round = None;
        self.timer = AnimationTimer::started(frame, self.config.animation_frames);
    }

    /// Frames left in the current round, `None` outside MIMIC
    pub fn time_to_go(&self, frame: u64) -> Option<i64> {
        if self.state != GameState::Mimic {
            return None;
        }
        let start = self.timer.start_frame?;
        let elapsed = frame.saturating_sub(start) as i64;
        Some(self.config.sensing_frames as i64 - elapsed)
    }

    /// Get current state
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Target of the running round, `None` outside MIMIC
    pub fn target(&self) -> Option<EmojiCode> {
        self.round.map(|r| r.target)
    }

    /// Current round context
    pub fn round(&self) -> Option<&RoundContext> {
        self.round.as_ref()
    }

    /// Current animation timer
    pub fn timer(&self) -> AnimationTimer {
        self.timer
    }

    /// Score so far
    pub fn score(&self) -> ScoreRecord {
        self.score.snapshot()
    }

    /// Get advance count
    pub fn advance_count(&self) -> u64 {
        self.advance_count
    }

    /// Back to INIT with a zero score; the random source keeps its position
    pub fn reset(&mut self) {
        debug!(advances = self.advance_count, "engine reset");
        self.state = GameState::Init;
        self.round = None;
        self.timer = AnimationTimer::default();
        self.score.reset();
        self.advance_count = 0;
    }
}

fn banner_position() -> Position {
    Position::new(BANNER_X, BANNER_Y)
}

/// Banner drawn while counting down in `state`
fn banner_directive(state: GameState) -> Option<RenderDirective> {
    let (text, color, font_px) = match state {
        GameState::GetReady => ("GET READY!", FillColor::Green, 64),
        GameState::Success => ("AWESOME!", FillColor::Red, 96),
        GameState::Failure => ("FAIL!", FillColor::Black, 96),
        GameState::Init | GameState::Mimic => return None,
    };
    Some(RenderDirective::new(text, color, font_px, banner_position()))
}

/// Remaining round time
fn countdown_directive(time_to_go: i64) -> RenderDirective {
    RenderDirective::new(time_to_go.to_string(), FillColor::Blue, 64, banner_position())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EMOJI_CATALOG;
    use pretty_assertions::assert_eq;

    fn seeded_engine() -> GameEngine {
        GameEngine::new(GameConfig::default().with_seed(1))
    }

    fn neutral() -> ClassificationResult {
        ClassificationResult::showing(EmojiCode(63))
    }

    /// Drive a fresh engine into MIMIC; returns the next frame index
    fn into_mimic(engine: &mut GameEngine) -> u64 {
        let mut frame = 1;
        engine.advance(frame, &neutral());
        for _ in 0..30 {
            frame += 1;
            engine.advance(frame, &neutral());
        }
        assert_eq!(engine.state(), GameState::Mimic);
        frame + 1
    }

    #[test]
    fn test_initial_state_is_init() {
        let engine = seeded_engine();
        assert_eq!(engine.state(), GameState::Init);
        assert_eq!(engine.score(), ScoreRecord::new(0, 0));
        assert!(engine.target().is_none());
    }

    #[test]
    fn test_init_to_get_ready() {
        let mut engine = seeded_engine();
        let output = engine.advance(1, &neutral());
        assert_eq!(output.state, GameState::GetReady);
        assert_eq!(output.reason, ReasonCode::G003_TRANSITION_TO_GET_READY);
        assert!(output.directive.is_none());
    }

    #[test]
    fn test_get_ready_lasts_thirty_frames() {
        let mut engine = seeded_engine();
        engine.advance(1, &neutral());

        for frame in 2..31 {
            let output = engine.advance(frame, &neutral());
            assert_eq!(output.state, GameState::GetReady);
            assert_eq!(output.directive.unwrap().text, "GET READY!");
        }

        let output = engine.advance(31, &neutral());
        assert_eq!(output.state, GameState::Mimic);
        assert_eq!(output.reason, ReasonCode::G003_TRANSITION_TO_MIMIC);
        let target = output.new_target.unwrap();
        assert!(target.in_catalog());
        assert_eq!(engine.target(), Some(target));
    }

    #[test]
    fn test_get_ready_directive_style() {
        let mut engine = seeded_engine();
        engine.advance(1, &neutral());
        let directive = engine.advance(2, &neutral()).directive.unwrap();
        assert_eq!(directive.color, FillColor::Green);
        assert_eq!(directive.font_px, 64);
        assert_eq!(directive.position, Position::new(30.0, 100.0));
    }

    #[test]
    fn test_mimic_entry_leaves_timer_unset() {
        let mut engine = seeded_engine();
        into_mimic(&mut engine);
        let timer = engine.timer();
        assert_eq!(timer.start_frame, Some(31));
        assert_eq!(timer.remaining, None);
        assert_eq!(engine.time_to_go(32), Some(99));
    }

    #[test]
    fn test_mimic_renders_time_to_go() {
        let mut engine = seeded_engine();
        let frame = into_mimic(&mut engine);
        let directive = engine.advance(frame, &neutral()).directive.unwrap();
        assert_eq!(directive.text, "99");
        assert_eq!(directive.color, FillColor::Blue);
    }

    #[test]
    fn test_failure_after_hundred_frames() {
        let mut engine = seeded_engine();
        let start = into_mimic(&mut engine);

        for frame in start..start + 99 {
            let output = engine.advance(frame, &neutral());
            assert_eq!(output.state, GameState::Mimic, "frame {}", frame);
        }

        let output = engine.advance(start + 99, &neutral());
        assert_eq!(output.state, GameState::Failure);
        assert_eq!(output.score_update, Some(ScoreRecord::new(0, 1)));
        assert_eq!(engine.score(), ScoreRecord::new(0, 1));
    }

    #[test]
    fn test_three_matching_frames_win() {
        let mut engine = seeded_engine();
        let frame = into_mimic(&mut engine);
        let hit = ClassificationResult::showing(engine.target().unwrap());

        assert_eq!(engine.advance(frame, &hit).reason, ReasonCode::G002_MATCH_STARTED);
        assert_eq!(engine.advance(frame + 1, &hit).reason, ReasonCode::G002_MATCH_CONFIRMING);
        let output = engine.advance(frame + 2, &hit);

        assert_eq!(output.state, GameState::Success);
        assert_eq!(output.score_update, Some(ScoreRecord::new(1, 1)));
    }

    #[test]
    fn test_mismatch_resets_confirmation() {
        let mut engine = seeded_engine();
        let mut frame = into_mimic(&mut engine);
        let target = engine.target().unwrap();
        let hit = ClassificationResult::showing(target);
        let miss = ClassificationResult::showing(
            *EMOJI_CATALOG.iter().find(|c| **c != target).unwrap(),
        );

        engine.advance(frame, &hit);
        engine.advance(frame + 1, &hit);
        let output = engine.advance(frame + 2, &miss);
        assert_eq!(output.reason, ReasonCode::G002_NO_MATCH);
        assert!(!engine.round().unwrap().is_sensing);
        assert_eq!(engine.round().unwrap().confirm_remaining, None);
        frame += 3;

        // Partial progress is gone: two more hits are not enough
        engine.advance(frame, &hit);
        engine.advance(frame + 1, &hit);
        assert_eq!(engine.state(), GameState::Mimic);
        engine.advance(frame + 2, &hit);
        assert_eq!(engine.state(), GameState::Success);
    }

    #[test]
    fn test_success_banner_then_new_round() {
        let mut engine = seeded_engine();
        let frame = into_mimic(&mut engine);
        let hit = ClassificationResult::showing(engine.target().unwrap());
        for i in 0..3 {
            engine.advance(frame + i, &hit);
        }
        assert_eq!(engine.state(), GameState::Success);
        assert!(engine.round().is_none());
        assert_eq!(engine.target(), None);

        let mut frame = frame + 3;
        for _ in 0..29 {
            let output = engine.advance(frame, &neutral());
            assert_eq!(output.directive.unwrap().text, "AWESOME!");
            frame += 1;
        }
        let output = engine.advance(frame, &neutral());
        assert_eq!(output.state, GameState::Mimic);
        assert!(output.new_target.is_some());
        assert!(!engine.round().unwrap().is_sensing);
    }

    #[test]
    fn test_failure_banner_style() {
        let mut engine = seeded_engine();
        let start = into_mimic(&mut engine);
        for frame in start..start + 100 {
            engine.advance(frame, &neutral());
        }
        assert_eq!(engine.state(), GameState::Failure);
        assert!(engine.round().is_none());
        let directive = engine.advance(start + 100, &neutral()).directive.unwrap();
        assert_eq!(directive.text, "FAIL!");
        assert_eq!(directive.color, FillColor::Black);
        assert_eq!(directive.font_px, 96);
    }

    #[test]
    fn test_seeded_engines_agree() {
        let mut a = seeded_engine();
        let mut b = seeded_engine();
        into_mimic(&mut a);
        into_mimic(&mut b);
        assert_eq!(a.target(), b.target());
    }

    #[test]
    fn test_same_inputs_same_outputs() {
        let mut a = seeded_engine();
        let mut b = seeded_engine();
        for frame in 1..=140 {
            let out_a = a.advance(frame, &neutral());
            let out_b = b.advance(frame, &neutral());
            assert_eq!(out_a, out_b);
        }
    }

    #[test]
    fn test_reset_returns_to_init() {
        let mut engine = seeded_engine();
        let start = into_mimic(&mut engine);
        for frame in start..start + 100 {
            engine.advance(frame, &neutral());
        }
        assert_eq!(engine.score(), ScoreRecord::new(0, 1));

        engine.reset();
        assert_eq!(engine.state(), GameState::Init);
        assert_eq!(engine.score(), ScoreRecord::new(0, 0));
        assert!(engine.round().is_none());
        assert_eq!(engine.advance_count(), 0);

        // Reset from INIT is harmless
        engine.reset();
        assert_eq!(engine.state(), GameState::Init);
    }
}
