//! Core types for Mimic Me!

mod state;
mod emoji;
mod frame;
mod directive;
mod score;
mod reason;
mod output;

pub use state::GameState;
pub use emoji::{EmojiCode, EMOJI_CATALOG, normalize};
pub use frame::{FeaturePoint, EmojiScores, ClassificationResult, DetectorEvent};
pub use directive::{FillColor, Position, RenderDirective};
pub use score::ScoreRecord;
pub use reason::ReasonCode;
pub use output::FrameOutput;
