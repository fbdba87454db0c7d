//! Core modules for Mimic Me!

pub mod selector;
pub mod score;
pub mod engine;
pub mod overlay;
pub mod detector;
pub mod display;
pub mod session;
pub mod player;
pub mod api;

pub use selector::RoundSelector;
pub use score::ScoreTracker;
pub use engine::{GameEngine, RoundContext, AnimationTimer};
pub use overlay::{landmark_anchor, dominant_emoji_directive};
pub use detector::{FaceDetector, FrameSubscription, DetectorCommand, ScriptedDetector, RemoteDetector};
pub use display::{GameDisplay, ClientUpdate, ChannelDisplay, RecordingDisplay, TerminalDisplay};
pub use session::SessionController;
pub use player::SimulatedPlayer;
pub use api::{create_router, run_server};
