//! Overlay helpers: where to draw the classifier's dominant emoji

use crate::types::{ClassificationResult, FeaturePoint, FillColor, Position, RenderDirective};
use crate::OVERLAY_OFFSET;

/// Font size of the dominant-emoji overlay
pub const OVERLAY_FONT_PX: u32 = 128;

/// Top-right corner of the landmark box, nudged outward.
///
/// Canvas y grows downward, so "top" is the smallest y.
pub fn landmark_anchor(points: &[FeaturePoint]) -> Option<Position> {
    let first = points.first()?;
    let (max_x, min_y) = points
        .iter()
        .fold((first.x, first.y), |(x, y), p| (x.max(p.x), y.min(p.y)));
    Some(Position::new(max_x + OVERLAY_OFFSET, min_y - OVERLAY_OFFSET))
}

/// Dominant emoji drawn next to the face, `None` without landmarks
pub fn dominant_emoji_directive(face: &ClassificationResult) -> Option<RenderDirective> {
    let position = landmark_anchor(&face.feature_points)?;
    Some(RenderDirective::new(
        face.dominant_emoji(),
        FillColor::Yellow,
        OVERLAY_FONT_PX,
        position,
    ))
}
