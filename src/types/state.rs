//! Game state definitions

use serde::{Deserialize, Serialize};

/// The five phases of a Mimic Me! session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    /// Freshly (re)initialized, nothing shown yet
    Init,
    /// "GET READY!" countdown before the first round
    GetReady,
    /// A target is displayed and the player is mimicking it
    Mimic,
    /// Target matched, celebrating
    Success,
    /// Time ran out, commiserating
    Failure,
}

impl GameState {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            GameState::Init => "\x1b[90m",     // Gray
            GameState::GetReady => "\x1b[32m", // Green
            GameState::Mimic => "\x1b[34m",    // Blue
            GameState::Success => "\x1b[31m",  // Red
            GameState::Failure => "\x1b[37m",  // White
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for state
    pub fn emoji(&self) -> &'static str {
        match self {
            GameState::Init => "⏳",
            GameState::GetReady => "🚦",
            GameState::Mimic => "🎭",
            GameState::Success => "🎉",
            GameState::Failure => "💥",
        }
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameState::Init => "INIT",
            GameState::GetReady => "GET_READY",
            GameState::Mimic => "MIMIC",
            GameState::Success => "SUCCESS",
            GameState::Failure => "FAILURE",
        };
        write!(f, "{}", name)
    }
}
