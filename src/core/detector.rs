//! Face detector boundary
//!
//! The detector itself (camera, face finding, classification) lives outside
//! this crate. The session only starts, stops and resets it, and holds a
//! subscription while it wants frame results.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::io::BufRead;
use std::path::Path;
use tokio::sync::broadcast;
use tracing::debug;

use crate::core::display::ClientUpdate;
use crate::error::{MimicError, Result};
use crate::types::DetectorEvent;

/// Handle for a registered frame-result callback.
///
/// Not `Clone`: giving it back to `unsubscribe_frames` is the only way to
/// end the subscription.
#[derive(Debug, PartialEq, Eq)]
pub struct FrameSubscription(u64);

/// Control calls sent to the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorCommand {
    Start,
    Stop,
    Reset,
}

/// Outbound control surface of the face detector
pub trait FaceDetector {
    /// Begin producing frame results
    fn start_detection(&mut self);
    /// Stop producing frame results
    fn stop_detection(&mut self);
    /// Drop the detector's per-session tracking state
    fn reset_detection(&mut self);
    /// Is the detector producing frames?
    fn is_running(&self) -> bool;
    /// Register for frame results
    fn subscribe_frames(&mut self) -> FrameSubscription;
    /// Unregister; no frame results are delivered for this handle afterwards
    fn unsubscribe_frames(&mut self, subscription: FrameSubscription);
}

// =============================================================================
// SCRIPTED DETECTOR - replays recorded events
// =============================================================================

/// Detector that replays a fixed list of events.
///
/// Frame results are only handed out while running with a live subscriber;
/// anything else is skipped, as a stopped camera produces nothing.
#[derive(Debug, Default)]
pub struct ScriptedDetector {
    events: VecDeque<DetectorEvent>,
    running: bool,
    subscriber: Option<u64>,
    next_subscription: u64,
    commands: Vec<DetectorCommand>,
}

impl ScriptedDetector {
    /// Create detector that will replay `events` in order
    pub fn new(events: impl IntoIterator<Item = DetectorEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Load a JSON-lines recording; blank lines and `#` comments are skipped
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Parse a JSON-lines recording
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut events = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let event = serde_json::from_str(trimmed).map_err(|source| MimicError::Replay {
                line: index + 1,
                source,
            })?;
            events.push(event);
        }
        Ok(Self::new(events))
    }

    /// Next deliverable event
    pub fn poll(&mut self) -> Option<DetectorEvent> {
        while let Some(event) = self.events.pop_front() {
            let is_frame = matches!(event, DetectorEvent::FrameResult { .. });
            if is_frame && !(self.running && self.subscriber.is_some()) {
                debug!("scripted detector skipped frame while idle");
                continue;
            }
            return Some(event);
        }
        None
    }

    /// Events not yet delivered
    pub fn pending(&self) -> usize {
        self.events.len()
    }

    /// Is anyone subscribed to frame results?
    pub fn has_subscriber(&self) -> bool {
        self.subscriber.is_some()
    }

    /// Control calls received so far
    pub fn commands(&self) -> &[DetectorCommand] {
        &self.commands
    }
}

impl FaceDetector for ScriptedDetector {
    fn start_detection(&mut self) {
        self.commands.push(DetectorCommand::Start);
        self.running = true;
    }

    fn stop_detection(&mut self) {
        self.commands.push(DetectorCommand::Stop);
        self.running = false;
    }

    fn reset_detection(&mut self) {
        self.commands.push(DetectorCommand::Reset);
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn subscribe_frames(&mut self) -> FrameSubscription {
        self.next_subscription += 1;
        self.subscriber = Some(self.next_subscription);
        FrameSubscription(self.next_subscription)
    }

    fn unsubscribe_frames(&mut self, subscription: FrameSubscription) {
        if self.subscriber == Some(subscription.0) {
            self.subscriber = None;
        }
    }
}

// =============================================================================
// REMOTE DETECTOR - detector running in a browser
// =============================================================================

/// Mirror of a detector running on the client.
///
/// Control calls are published to the client as `ClientUpdate::Control`;
/// frame results arrive through the API.
#[derive(Debug)]
pub struct RemoteDetector {
    updates: broadcast::Sender<ClientUpdate>,
    running: bool,
    subscriber: Option<u64>,
    next_subscription: u64,
}

impl RemoteDetector {
    pub fn new(updates: broadcast::Sender<ClientUpdate>) -> Self {
        Self {
            updates,
            running: false,
            subscriber: None,
            next_subscription: 0,
        }
    }

    fn send(&self, command: DetectorCommand) {
        // No connected client is fine; the command is simply not observed
        let _ = self.updates.send(ClientUpdate::Control { command });
    }
}

impl FaceDetector for RemoteDetector {
    fn start_detection(&mut self) {
        self.running = true;
        self.send(DetectorCommand::Start);
    }

    fn stop_detection(&mut self) {
        self.running = false;
        self.send(DetectorCommand::Stop);
    }

    fn reset_detection(&mut self) {
        self.send(DetectorCommand::Reset);
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn subscribe_frames(&mut self) -> FrameSubscription {
        self.next_subscription += 1;
        self.subscriber = Some(self.next_subscription);
        FrameSubscription(self.next_subscription)
    }

    fn unsubscribe_frames(&mut self, subscription: FrameSubscription) {
        if self.subscriber == Some(subscription.0) {
            self.subscriber = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassificationResult, EmojiCode};

    fn frame(t: f64) -> DetectorEvent {
        DetectorEvent::single_face(ClassificationResult::showing(EmojiCode(128515)), t)
    }

    #[test]
    fn test_frames_skipped_until_running_and_subscribed() {
        let mut detector = ScriptedDetector::new(vec![frame(0.0), DetectorEvent::Ready, frame(0.1)]);
        assert_eq!(detector.poll(), Some(DetectorEvent::Ready));
        assert_eq!(detector.poll(), None);
    }

    #[test]
    fn test_frames_delivered_with_subscription() {
        let mut detector = ScriptedDetector::new(vec![frame(0.0), frame(0.1)]);
        let sub = detector.subscribe_frames();
        detector.start_detection();
        assert!(detector.poll().is_some());

        detector.unsubscribe_frames(sub);
        assert!(!detector.has_subscriber());
        assert_eq!(detector.poll(), None);
    }

    #[test]
    fn test_stale_handle_does_not_unsubscribe() {
        let mut detector = ScriptedDetector::default();
        let old = detector.subscribe_frames();
        let _new = detector.subscribe_frames();
        detector.unsubscribe_frames(old);
        assert!(detector.has_subscriber());
    }

    #[test]
    fn test_reader_parses_lines_and_comments() {
        let input = "# recording\n{\"type\":\"ready\"}\n\n{\"type\":\"frame_result\",\"timestamp\":0.5,\"faces\":[]}\n";
        let detector = ScriptedDetector::from_reader(input.as_bytes()).unwrap();
        assert_eq!(detector.pending(), 2);
    }

    #[test]
    fn test_reader_reports_bad_line() {
        let input = "{\"type\":\"ready\"}\nnot json\n";
        match ScriptedDetector::from_reader(input.as_bytes()) {
            Err(MimicError::Replay { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected replay error, got {:?}", other.map(|d| d.pending())),
        }
    }

    #[test]
    fn test_remote_detector_publishes_commands() {
        let (tx, mut rx) = broadcast::channel(8);
        let mut detector = RemoteDetector::new(tx);
        detector.start_detection();
        assert!(detector.is_running());
        assert_eq!(
            rx.try_recv().unwrap(),
            ClientUpdate::Control { command: DetectorCommand::Start }
        );
    }
}
