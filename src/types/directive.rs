//! Drawing instructions handed to the rendering surface

use serde::{Deserialize, Serialize};

/// Fill colors used by the game overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillColor {
    Green,
    Blue,
    Red,
    Black,
    Yellow,
    White,
}

impl FillColor {
    /// CSS color name
    pub fn css(&self) -> &'static str {
        match self {
            FillColor::Green => "green",
            FillColor::Blue => "blue",
            FillColor::Red => "red",
            FillColor::Black => "black",
            FillColor::Yellow => "yellow",
            FillColor::White => "white",
        }
    }
}

impl std::fmt::Display for FillColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.css())
    }
}

/// Canvas position of the text baseline start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Text to draw on the video canvas for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderDirective {
    pub text: String,
    pub color: FillColor,
    /// Font size in pixels (bold Arial)
    pub font_px: u32,
    pub position: Position,
}

impl RenderDirective {
    /// Create new directive
    pub fn new(text: impl Into<String>, color: FillColor, font_px: u32, position: Position) -> Self {
        Self {
            text: text.into(),
            color,
            font_px,
            position,
        }
    }

    /// Canvas font string, e.g. `bold 64px Arial`
    pub fn font(&self) -> String {
        format!("bold {}px Arial", self.font_px)
    }
}
