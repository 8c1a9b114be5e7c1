//! Normalized-space geometry helpers shared by the movement validator.

use serde::{Deserialize, Serialize};

/// A point in normalized field space, both axes nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.hypot(dy)
    }

    /// Midpoint between two points.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Distance from `point` to the line segment `a`-`b`.
///
/// Projects the point onto the segment, clamps the projection parameter to
/// `[0, 1]`, and measures the Euclidean distance to the clamped point. A
/// degenerate zero-length segment collapses to point distance.
#[must_use]
pub fn point_to_segment_distance(point: Position, a: Position, b: Position) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f32::EPSILON {
        return point.distance(a);
    }
    let t = (((point.x - a.x) * dx + (point.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    point.distance(Position::new(a.x + t * dx, a.y + t * dy))
}
