//! Session Controller: owns one game session and bridges detector events
//! into the engine.
//!
//! Events are handled one at a time, to completion, on the caller's thread;
//! the engine is never advanced concurrently.

use tracing::{debug, info, warn};

use crate::core::detector::{FaceDetector, FrameSubscription};
use crate::core::display::GameDisplay;
use crate::core::overlay::dominant_emoji_directive;
use crate::core::GameEngine;
use crate::types::{ClassificationResult, DetectorEvent, FrameOutput, GameState, ScoreRecord};
use crate::{GameConfig, PLACEHOLDER_TARGET};

/// One player's game: detector control, engine and display
#[derive(Debug)]
pub struct SessionController<D: FaceDetector, V: GameDisplay> {
    detector: D,
    display: V,
    engine: GameEngine,
    /// Processed frames (frames with a face) since the last reinitialize
    frame: u64,
    subscription: Option<FrameSubscription>,
}

impl<D: FaceDetector, V: GameDisplay> SessionController<D, V> {
    /// Create a session subscribed to the detector's frame results
    pub fn new(detector: D, display: V, config: GameConfig) -> Self {
        Self::with_engine(detector, display, GameEngine::new(config))
    }

    /// Create a session around an existing engine
    pub fn with_engine(mut detector: D, display: V, engine: GameEngine) -> Self {
        let subscription = Some(detector.subscribe_frames());
        let mut session = Self {
            detector,
            display,
            engine,
            frame: 0,
            subscription,
        };
        session.reinitialize();
        session
    }

    /// Start button
    pub fn start(&mut self) {
        if !self.detector.is_running() {
            self.display.clear_log();
            if self.subscription.is_none() {
                self.subscription = Some(self.detector.subscribe_frames());
            }
            self.detector.start_detection();
            info!("detection started");
        }
        self.display.append_log("Start button pressed");
    }

    /// Stop button; no frame reaches the engine after this returns
    pub fn stop(&mut self) {
        self.display.append_log("Stop button pressed");
        if let Some(subscription) = self.subscription.take() {
            self.detector.unsubscribe_frames(subscription);
        }
        if self.detector.is_running() {
            self.detector.stop_detection();
            info!("detection stopped");
        }
    }

    /// Reset button
    pub fn reset(&mut self) {
        self.display.append_log("Reset button pressed");
        if self.detector.is_running() {
            self.detector.reset_detection();
        }
        self.display.clear_results();
        self.display.clear_log();
        self.reinitialize();
    }

    /// Back to INIT with a zero score and a placeholder target
    fn reinitialize(&mut self) {
        debug!(frames = self.frame, "reinitializing session");
        self.engine.reset();
        self.frame = 0;
        self.display.show_score(ScoreRecord::default());
        self.display.show_target(PLACEHOLDER_TARGET);
    }

    /// Dispatch one detector event.
    ///
    /// Returns the engine output when the event was a processed frame.
    pub fn handle_event(&mut self, event: DetectorEvent) -> Option<FrameOutput> {
        debug!(event = event.name(), "detector event");
        match event {
            DetectorEvent::Ready => {
                self.display.append_log("The detector reports initialized");
                self.reinitialize();
                None
            }
            DetectorEvent::Stopped => {
                self.display.append_log("The detector reports stopped");
                self.display.clear_results();
                None
            }
            DetectorEvent::CameraGranted => {
                self.display.append_log("Webcam access allowed");
                None
            }
            DetectorEvent::CameraDenied => {
                warn!("webcam access denied");
                self.display.append_log("webcam denied");
                None
            }
            DetectorEvent::FrameResult { faces, timestamp } => self.on_frame_result(&faces, timestamp),
        }
    }

    /// Frame results: report, draw the first face, advance the game
    pub fn on_frame_result(
        &mut self,
        faces: &[ClassificationResult],
        timestamp: f64,
    ) -> Option<FrameOutput> {
        if self.subscription.is_none() || !self.detector.is_running() {
            debug!(timestamp, "frame dropped, detection not active");
            return None;
        }

        let mut lines = vec![
            format!("Timestamp: {:.2}", timestamp),
            format!("Number of faces found: {}", faces.len()),
        ];
        let Some(face) = faces.first() else {
            self.display.show_results(&lines);
            return None;
        };
        lines.push(format!("Emoji: {}", face.dominant_emoji()));
        self.display.show_results(&lines);

        self.display.draw_landmarks(&face.feature_points);
        if let Some(overlay) = dominant_emoji_directive(face) {
            self.display.render(&overlay);
        }

        self.frame += 1;
        let output = self.engine.advance(self.frame, face);

        if let Some(target) = output.new_target {
            self.display.show_target(target);
        }
        if let Some(score) = output.score_update {
            self.display.show_score(score);
        }
        if let Some(directive) = &output.directive {
            self.display.render(directive);
        }
        Some(output)
    }

    /// Get current state
    pub fn state(&self) -> GameState {
        self.engine.state()
    }

    /// Score so far
    pub fn score(&self) -> ScoreRecord {
        self.engine.score()
    }

    /// Processed frames since the last reinitialize
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Are frame results currently accepted?
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.detector.is_running()
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    pub fn display(&self) -> &V {
        &self.display
    }
}
