//! Mimic Me!: emoji mimicry game engine
//!
//! The face detector feeds one classification per processed frame into a
//! session, which advances the game state machine and tells the display
//! what to draw: detector → SessionController → GameEngine → GameDisplay

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod types;

pub use config::GameConfig;
pub use error::{MimicError, Result};

// =============================================================================
// TIMING - all durations are processed-frame counts
// =============================================================================

/// Frames the player has to mimic a target
pub const SENSING_FRAMES: u32 = 100;

/// Frames spent on each GET READY / AWESOME / FAIL banner
pub const ANIMATION_FRAMES: u32 = 30;

/// Consecutive matching frames needed to win a round
pub const CONFIRM_FRAMES: u32 = 3;

// =============================================================================
// DISPLAY
// =============================================================================

/// Target shown before the first round (`?`)
pub const PLACEHOLDER_TARGET: types::EmojiCode = types::EmojiCode(63);

/// Where banners and the countdown are drawn
pub const BANNER_X: f64 = 30.0;
pub const BANNER_Y: f64 = 100.0;

/// Offset of the dominant-emoji overlay from the landmark box corner
pub const OVERLAY_OFFSET: f64 = 20.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
