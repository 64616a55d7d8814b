//! Engine Types
//!
//! Pitch-unit coordinates shared by every engine subsystem.
//!
//! ## Coordinate frame
//! - x: 0..120 (home goal line at 0, away goal line at 120)
//! - y: 0..80  (centre line of the goal mouth at 40)
//!
//! Velocities reuse the same type: a per-tick displacement in pitch units.

use serde::{Deserialize, Serialize};

/// 2D point (or per-tick displacement) in pitch units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Scale by a scalar.
    #[inline]
    pub fn scaled(self, factor: f32) -> Self {
        Self { x: self.x * factor, y: self.y * factor }
    }

    /// Component-wise sum.
    #[inline]
    pub fn offset(self, delta: Position) -> Self {
        Self { x: self.x + delta.x, y: self.y + delta.y }
    }

    /// Linear blend: `self * (1 - t) + other * t`.
    #[inline]
    pub fn lerp(self, other: Position, t: f32) -> Self {
        Self { x: self.x + (other.x - self.x) * t, y: self.y + (other.y - self.y) * t }
    }

    /// Clamp into an axis-aligned rectangle.
    #[inline]
    pub fn clamped(self, min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self { x: self.x.clamp(min_x, max_x), y: self.y.clamp(min_y, max_y) }
    }

    /// Unit vector from `self` toward `target`.
    ///
    /// Coincident points fall back to a unit length of 1 so the result is the
    /// zero vector instead of NaN.
    pub fn direction_to(&self, target: &Position) -> Position {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        let dist = (dx * dx + dy * dy).sqrt();
        let dist = if dist > 0.0 { dist } else { 1.0 };
        Position { x: dx / dist, y: dy / dist }
    }
}

/// Distance from `point` to the segment `start`→`end`.
///
/// Projects onto the line, clamps the parametric coordinate to [0, 1] and
/// measures to the clamped point. A degenerate segment measures to `start`.
pub fn point_to_segment_distance(start: &Position, end: &Position, point: &Position) -> f32 {
    let ex = end.x - start.x;
    let ey = end.y - start.y;
    let len_sq = ex * ex + ey * ey;
    if len_sq == 0.0 {
        return start.distance_to(point);
    }

    let t = (((point.x - start.x) * ex + (point.y - start.y) * ey) / len_sq).clamp(0.0, 1.0);
    let closest = Position::new(start.x + t * ex, start.y + t * ey);
    closest.distance_to(point)
}
