//! Reason codes explaining what a single `advance` call did

use serde::{Deserialize, Serialize};

/// Reason codes for every per-frame outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // G001: Countdowns
    // =========================================================================
    /// GET READY banner counting down
    G001_GET_READY_COUNTDOWN,
    /// AWESOME banner counting down
    G001_SUCCESS_COUNTDOWN,
    /// FAIL banner counting down
    G001_FAILURE_COUNTDOWN,

    // =========================================================================
    // G002: Sensing
    // =========================================================================
    /// Expression does not match the target
    G002_NO_MATCH,
    /// First matching frame, confirmation armed
    G002_MATCH_STARTED,
    /// Matching frames accumulating toward success
    G002_MATCH_CONFIRMING,

    // =========================================================================
    // G003: Transitions
    // =========================================================================
    /// Transitioning from INIT to GET_READY
    G003_TRANSITION_TO_GET_READY,
    /// Entering MIMIC with a fresh target
    G003_TRANSITION_TO_MIMIC,
    /// Target confirmed, entering SUCCESS
    G003_TRANSITION_TO_SUCCESS,
    /// Time budget exhausted, entering FAILURE
    G003_TRANSITION_TO_FAILURE,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::G001_GET_READY_COUNTDOWN => "G001_GET_READY_COUNTDOWN",
            Self::G001_SUCCESS_COUNTDOWN => "G001_SUCCESS_COUNTDOWN",
            Self::G001_FAILURE_COUNTDOWN => "G001_FAILURE_COUNTDOWN",
            Self::G002_NO_MATCH => "G002_NO_MATCH",
            Self::G002_MATCH_STARTED => "G002_MATCH_STARTED",
            Self::G002_MATCH_CONFIRMING => "G002_MATCH_CONFIRMING",
            Self::G003_TRANSITION_TO_GET_READY => "G003_TRANSITION_TO_GET_READY",
            Self::G003_TRANSITION_TO_MIMIC => "G003_TRANSITION_TO_MIMIC",
            Self::G003_TRANSITION_TO_SUCCESS => "G003_TRANSITION_TO_SUCCESS",
            Self::G003_TRANSITION_TO_FAILURE => "G003_TRANSITION_TO_FAILURE",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::G001_GET_READY_COUNTDOWN => "Getting ready",
            Self::G001_SUCCESS_COUNTDOWN => "Celebrating success",
            Self::G001_FAILURE_COUNTDOWN => "Round lost",
            Self::G002_NO_MATCH => "Expression does not match",
            Self::G002_MATCH_STARTED => "Expression matched, confirming",
            Self::G002_MATCH_CONFIRMING => "Still matching",
            Self::G003_TRANSITION_TO_GET_READY => "Session started",
            Self::G003_TRANSITION_TO_MIMIC => "New target drawn",
            Self::G003_TRANSITION_TO_SUCCESS => "Target mimicked",
            Self::G003_TRANSITION_TO_FAILURE => "Out of time",
        }
    }

    /// Did this call change the game state?
    pub fn is_transition(&self) -> bool {
        matches!(
            self,
            Self::G003_TRANSITION_TO_GET_READY
                | Self::G003_TRANSITION_TO_MIMIC
                | Self::G003_TRANSITION_TO_SUCCESS
                | Self::G003_TRANSITION_TO_FAILURE
        )
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
