//! Integration tests for Slice 3 - config and detector recordings
//!
//! Tests loading from disk and the error paths around it

use std::path::PathBuf;

use mimicme::core::{RecordingDisplay, ScriptedDetector, SessionController, SimulatedPlayer};
use mimicme::types::{DetectorEvent, GameState};
use mimicme::{GameConfig, MimicError};

fn temp_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("mimicme_{}_{}", std::process::id(), name));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_config_file_overrides_defaults() {
    let path = temp_file("config.json", r#"{"sensing_frames": 40, "confirm_frames": 2, "seed": 5}"#);
    let config = GameConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.sensing_frames, 40);
    assert_eq!(config.confirm_frames, 2);
    assert_eq!(config.animation_frames, 30);
    assert_eq!(config.seed, Some(5));
}

#[test]
fn test_invalid_config_rejected() {
    let path = temp_file("bad_config.json", r#"{"sensing_frames": 0}"#);
    let result = GameConfig::load(&path);
    std::fs::remove_file(&path).ok();
    assert!(matches!(result, Err(MimicError::InvalidConfig(_))));
}

#[test]
fn test_malformed_config_is_json_error() {
    let path = temp_file("broken_config.json", "{ sensing_frames: ");
    let result = GameConfig::load(&path);
    std::fs::remove_file(&path).ok();
    assert!(matches!(result, Err(MimicError::Json(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = ScriptedDetector::load("/definitely/not/here.jsonl");
    assert!(matches!(result, Err(MimicError::Io(_))));
}

#[test]
fn test_recording_replays_to_get_ready() {
    let mut content = String::from("# two faces then a gap\n{\"type\":\"ready\"}\n");
    for i in 0..2 {
        content.push_str(&format!(
            "{{\"type\":\"frame_result\",\"timestamp\":{}.0,\"faces\":[{{\"emojis\":{{\"dominantEmoji\":\"😐\"}},\"featurePoints\":[]}}]}}\n",
            i
        ));
    }
    content.push_str("{\"type\":\"frame_result\",\"timestamp\":2.0,\"faces\":[]}\n");
    let path = temp_file("recording.jsonl", &content);

    let detector = ScriptedDetector::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(detector.pending(), 4);

    let mut session = SessionController::new(detector, RecordingDisplay::new(), GameConfig::default());
    session.start();
    let mut processed = 0;
    while let Some(event) = session.detector_mut().poll() {
        if session.handle_event(event).is_some() {
            processed += 1;
        }
    }

    assert_eq!(processed, 2);
    assert_eq!(session.state(), GameState::GetReady);
    assert_eq!(session.display().results[1], "Number of faces found: 0");
}

#[test]
fn test_short_rounds_from_config() {
    let config = GameConfig {
        sensing_frames: 10,
        animation_frames: 2,
        confirm_frames: 1,
        seed: Some(3),
    };
    let mut session = SessionController::new(ScriptedDetector::default(), RecordingDisplay::new(), config);
    session.start();

    let neutral = mimicme::types::ClassificationResult::showing(mimicme::types::EmojiCode(63));
    // INIT + 2 GET_READY frames
    for i in 0..3 {
        session.on_frame_result(std::slice::from_ref(&neutral), i as f64);
    }
    assert_eq!(session.state(), GameState::Mimic);

    let target = session.engine().target().unwrap();
    let hit = mimicme::types::ClassificationResult::showing(target);
    let output = session.on_frame_result(&[hit], 3.0).unwrap();
    assert_eq!(output.state, GameState::Success);
}

/// Long simulated game: the score invariant holds throughout
#[test]
fn test_simulated_player_soak() {
    let config = GameConfig::default().with_seed(77);
    let mut session = SessionController::new(ScriptedDetector::default(), RecordingDisplay::new(), config);
    let mut player = SimulatedPlayer::new(78, 140);
    session.start();
    session.handle_event(DetectorEvent::Ready);

    for i in 0..5000 {
        let face = player.next_face(session.state(), session.engine().target());
        session.on_frame_result(&[face], i as f64 / 15.0);
        let score = session.score();
        assert!(score.attempts >= score.correct);
    }

    let score = session.score();
    assert!(score.attempts > 0);
    assert!(score.correct > 0, "simulated player never won: {}", score);
    assert!(score.correct < score.attempts, "simulated player never lost: {}", score);
}
