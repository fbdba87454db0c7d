//! Errors for everything around the game core
//!
//! The state machine itself never fails; these cover loading configuration
//! and detector recordings.

use thiserror::Error;

/// Result type for config and replay loading
pub type Result<T> = std::result::Result<T, MimicError>;

#[derive(Debug, Error)]
pub enum MimicError {
    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration values out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Bad line in a detector recording
    #[error("Replay line {line}: {source}")]
    Replay {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
