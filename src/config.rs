//! Game configuration
//!
//! Defaults come from the crate constants; a JSON file may override any
//! subset of fields and the CLI overrides on top of that.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MimicError, Result};
use crate::{ANIMATION_FRAMES, CONFIRM_FRAMES, SENSING_FRAMES};

/// Tunable timing and seeding for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Frames per round before it is lost
    pub sensing_frames: u32,
    /// Frames per banner animation
    pub animation_frames: u32,
    /// Consecutive matching frames to win
    pub confirm_frames: u32,
    /// Seed for target selection; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            sensing_frames: SENSING_FRAMES,
            animation_frames: ANIMATION_FRAMES,
            confirm_frames: CONFIRM_FRAMES,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load from a JSON file and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Same config with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject durations that would stall or skip phases
    pub fn validate(&self) -> Result<()> {
        if self.sensing_frames == 0 {
            return Err(MimicError::InvalidConfig("sensing_frames must be > 0".into()));
        }
        if self.animation_frames == 0 {
            return Err(MimicError::InvalidConfig("animation_frames must be > 0".into()));
        }
        if self.confirm_frames == 0 {
            return Err(MimicError::InvalidConfig("confirm_frames must be > 0".into()));
        }
        if self.confirm_frames >= self.sensing_frames {
            return Err(MimicError::InvalidConfig(format!(
                "confirm_frames ({}) must be below sensing_frames ({})",
                self.confirm_frames, self.sensing_frames
            )));
        }
        Ok(())
    }
}
