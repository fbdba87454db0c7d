//! Per-frame classification data and detector events

use serde::{Deserialize, Serialize};

use crate::types::EmojiCode;

/// A facial landmark in image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeaturePoint {
    pub x: f64,
    pub y: f64,
}

impl FeaturePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Emoji classification for one face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmojiScores {
    /// Dominant emoji as reported: one UTF-16 unit or a surrogate pair
    pub dominant_emoji: String,
}

/// One detected face as reported by the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub emojis: EmojiScores,
    /// Landmarks, forwarded untouched to the overlay
    #[serde(default)]
    pub feature_points: Vec<FeaturePoint>,
}

impl ClassificationResult {
    /// Create a result with the given dominant emoji
    pub fn new(dominant_emoji: impl Into<String>, feature_points: Vec<FeaturePoint>) -> Self {
        Self {
            emojis: EmojiScores {
                dominant_emoji: dominant_emoji.into(),
            },
            feature_points,
        }
    }

    /// Create a landmark-free result showing `code`
    pub fn showing(code: EmojiCode) -> Self {
        Self::new(code.to_string(), Vec::new())
    }

    /// Dominant emoji string
    pub fn dominant_emoji(&self) -> &str {
        &self.emojis.dominant_emoji
    }

    /// Dominant emoji normalized to a code point
    pub fn dominant_code(&self) -> EmojiCode {
        EmojiCode::from_dominant(&self.emojis.dominant_emoji)
    }
}

/// Everything the face detector can tell the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DetectorEvent {
    /// Detector initialized and ready to run
    Ready,
    /// Detector stopped
    Stopped,
    /// Webcam access allowed
    CameraGranted,
    /// Webcam access denied
    CameraDenied,
    /// Results from processing one video frame
    FrameResult {
        faces: Vec<ClassificationResult>,
        /// Seconds since detection started
        timestamp: f64,
    },
}

impl DetectorEvent {
    /// Frame result for a single face
    pub fn single_face(face: ClassificationResult, timestamp: f64) -> Self {
        DetectorEvent::FrameResult {
            faces: vec![face],
            timestamp,
        }
    }

    /// Frame result with nobody in view
    pub fn no_face(timestamp: f64) -> Self {
        DetectorEvent::FrameResult {
            faces: Vec::new(),
            timestamp,
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            DetectorEvent::Ready => "ready",
            DetectorEvent::Stopped => "stopped",
            DetectorEvent::CameraGranted => "camera_granted",
            DetectorEvent::CameraDenied => "camera_denied",
            DetectorEvent::FrameResult { .. } => "frame_result",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_detector_json() {
        let json = r#"{
            "type": "frame_result",
            "timestamp": 1.25,
            "faces": [{
                "emojis": {"dominantEmoji": "😃"},
                "featurePoints": [{"x": 10.0, "y": 20.0}]
            }]
        }"#;
        let event: DetectorEvent = serde_json::from_str(json).unwrap();
        match event {
            DetectorEvent::FrameResult { faces, timestamp } => {
                assert_eq!(timestamp, 1.25);
                assert_eq!(faces.len(), 1);
                assert_eq!(faces[0].dominant_code(), EmojiCode(128515));
                assert_eq!(faces[0].feature_points[0], FeaturePoint::new(10.0, 20.0));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_lifecycle_events_parse() {
        let event: DetectorEvent = serde_json::from_str(r#"{"type":"camera_denied"}"#).unwrap();
        assert_eq!(event, DetectorEvent::CameraDenied);
        assert_eq!(event.name(), "camera_denied");
    }

    #[test]
    fn test_showing_normalizes_back() {
        let face = ClassificationResult::showing(EmojiCode(128545));
        assert_eq!(face.dominant_code(), EmojiCode(128545));
        assert!(face.feature_points.is_empty());
    }
}
