//! Display boundary: target, score, logs and canvas drawing
//!
//! Every call is fire-and-forget; nothing is returned to the game.

use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::core::detector::DetectorCommand;
use crate::types::{EmojiCode, FeaturePoint, FillColor, RenderDirective, ScoreRecord};

/// Outbound display surface
pub trait GameDisplay {
    /// Show the emoji the player must mimic
    fn show_target(&mut self, code: EmojiCode);
    /// Show "Score: correct / attempts"
    fn show_score(&mut self, score: ScoreRecord);
    /// Append a line to the log panel
    fn append_log(&mut self, text: &str);
    /// Empty the log panel
    fn clear_log(&mut self);
    /// Replace the per-frame results panel
    fn show_results(&mut self, lines: &[String]);
    /// Empty the per-frame results panel
    fn clear_results(&mut self);
    /// Draw text on the video canvas
    fn render(&mut self, directive: &RenderDirective);
    /// Draw facial landmarks on the video canvas
    fn draw_landmarks(&mut self, points: &[FeaturePoint]);
}

/// Display calls as messages for a remote client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientUpdate {
    Target { code: EmojiCode, html: String },
    Score { correct: u32, attempts: u32 },
    Log { text: String },
    ClearLog,
    Results { lines: Vec<String> },
    ClearResults,
    Render { directive: RenderDirective },
    Landmarks { points: Vec<FeaturePoint> },
    /// Detector control call, see `RemoteDetector`
    Control { command: DetectorCommand },
}

// =============================================================================
// CHANNEL DISPLAY
// =============================================================================

/// Publishes every display call on a broadcast channel
#[derive(Debug, Clone)]
pub struct ChannelDisplay {
    updates: broadcast::Sender<ClientUpdate>,
}

impl ChannelDisplay {
    pub fn new(updates: broadcast::Sender<ClientUpdate>) -> Self {
        Self { updates }
    }

    fn send(&self, update: ClientUpdate) {
        // Nobody listening yet is not an error
        let _ = self.updates.send(update);
    }
}

impl GameDisplay for ChannelDisplay {
    fn show_target(&mut self, code: EmojiCode) {
        self.send(ClientUpdate::Target {
            code,
            html: code.html_entity(),
        });
    }

    fn show_score(&mut self, score: ScoreRecord) {
        self.send(ClientUpdate::Score {
            correct: score.correct,
            attempts: score.attempts,
        });
    }

    fn append_log(&mut self, text: &str) {
        self.send(ClientUpdate::Log { text: text.to_string() });
    }

    fn clear_log(&mut self) {
        self.send(ClientUpdate::ClearLog);
    }

    fn show_results(&mut self, lines: &[String]) {
        self.send(ClientUpdate::Results { lines: lines.to_vec() });
    }

    fn clear_results(&mut self) {
        self.send(ClientUpdate::ClearResults);
    }

    fn render(&mut self, directive: &RenderDirective) {
        self.send(ClientUpdate::Render {
            directive: directive.clone(),
        });
    }

    fn draw_landmarks(&mut self, points: &[FeaturePoint]) {
        self.send(ClientUpdate::Landmarks { points: points.to_vec() });
    }
}

// =============================================================================
// RECORDING DISPLAY
// =============================================================================

/// Keeps the latest value of every panel plus the full call history
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    pub target: Option<EmojiCode>,
    pub score: Option<ScoreRecord>,
    pub log: Vec<String>,
    pub results: Vec<String>,
    pub rendered: Vec<RenderDirective>,
    pub landmark_frames: usize,
    pub history: Vec<ClientUpdate>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts of all rendered directives, in order
    pub fn rendered_texts(&self) -> Vec<&str> {
        self.rendered.iter().map(|d| d.text.as_str()).collect()
    }
}

impl GameDisplay for RecordingDisplay {
    fn show_target(&mut self, code: EmojiCode) {
        self.target = Some(code);
        self.history.push(ClientUpdate::Target {
            code,
            html: code.html_entity(),
        });
    }

    fn show_score(&mut self, score: ScoreRecord) {
        self.score = Some(score);
        self.history.push(ClientUpdate::Score {
            correct: score.correct,
            attempts: score.attempts,
        });
    }

    fn append_log(&mut self, text: &str) {
        self.log.push(text.to_string());
        self.history.push(ClientUpdate::Log { text: text.to_string() });
    }

    fn clear_log(&mut self) {
        self.log.clear();
        self.history.push(ClientUpdate::ClearLog);
    }

    fn show_results(&mut self, lines: &[String]) {
        self.results = lines.to_vec();
        self.history.push(ClientUpdate::Results { lines: lines.to_vec() });
    }

    fn clear_results(&mut self) {
        self.results.clear();
        self.history.push(ClientUpdate::ClearResults);
    }

    fn render(&mut self, directive: &RenderDirective) {
        self.rendered.push(directive.clone());
        self.history.push(ClientUpdate::Render {
            directive: directive.clone(),
        });
    }

    fn draw_landmarks(&mut self, points: &[FeaturePoint]) {
        self.landmark_frames += 1;
        self.history.push(ClientUpdate::Landmarks { points: points.to_vec() });
    }
}

// =============================================================================
// TERMINAL DISPLAY
// =============================================================================

/// Prints game-relevant display calls to stdout.
///
/// The dominant-emoji overlay and landmarks are canvas-only and not echoed.
#[derive(Debug, Clone, Default)]
pub struct TerminalDisplay {
    no_color: bool,
    verbose: bool,
    /// Print nothing, e.g. while stdout carries JSON
    silent: bool,
    last_text: Option<String>,
}

impl TerminalDisplay {
    pub fn new(no_color: bool, verbose: bool) -> Self {
        Self {
            no_color,
            verbose,
            silent: false,
            last_text: None,
        }
    }

    /// Display that swallows every call
    pub fn silent() -> Self {
        Self {
            silent: true,
            ..Self::default()
        }
    }

    fn paint(&self, text: &str, color: FillColor) -> String {
        if self.no_color {
            return text.to_string();
        }
        let color = match color {
            FillColor::Green => Color::Green,
            FillColor::Blue => Color::Blue,
            FillColor::Red => Color::Red,
            FillColor::Black => Color::BrightBlack,
            FillColor::Yellow => Color::Yellow,
            FillColor::White => Color::White,
        };
        text.color(color).bold().to_string()
    }
}

impl GameDisplay for TerminalDisplay {
    fn show_target(&mut self, code: EmojiCode) {
        if !self.silent {
            println!("Target: {}", code);
        }
    }

    fn show_score(&mut self, score: ScoreRecord) {
        if !self.silent {
            println!("{}", score);
        }
    }

    fn append_log(&mut self, text: &str) {
        if self.silent {
            return;
        }
        if self.no_color {
            println!("[log] {}", text);
        } else {
            println!("{} {}", "[log]".dimmed(), text);
        }
    }

    fn clear_log(&mut self) {}

    fn show_results(&mut self, lines: &[String]) {
        if self.verbose && !self.silent {
            println!("  {}", lines.join(" | "));
        }
    }

    fn clear_results(&mut self) {}

    fn render(&mut self, directive: &RenderDirective) {
        if self.silent || directive.color == FillColor::Yellow {
            return;
        }
        // Banners repeat for many frames; only print changes
        if self.last_text.as_deref() == Some(directive.text.as_str()) {
            return;
        }
        println!("{}", self.paint(&directive.text, directive.color));
        self.last_text = Some(directive.text.clone());
    }

    fn draw_landmarks(&mut self, _points: &[FeaturePoint]) {}
}
