//! Pitch geometry

use serde::{Deserialize, Serialize};

use crate::engine::types::Position;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    /// Goal line to goal line (default: 120)
    pub width: f32,
    /// Touchline to touchline (default: 80)
    pub height: f32,
    /// Players stay this far inside every boundary (default: 2)
    pub player_margin: f32,
    /// Goal mouth, inclusive (default: 32.5..=47.5)
    pub goal_mouth_min_y: f32,
    pub goal_mouth_max_y: f32,
    /// Where a bounced ball is placed inside the crossed line (default: 0.1)
    pub bounce_inset: f32,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 80.0,
            player_margin: 2.0,
            goal_mouth_min_y: 32.5,
            goal_mouth_max_y: 47.5,
            bounce_inset: 0.1,
        }
    }
}

impl PitchConfig {
    #[inline]
    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }

    /// Centre of the goal on the line at `goal_x`.
    #[inline]
    pub fn goal_center(&self, goal_x: f32) -> Position {
        Position::new(goal_x, self.center_y())
    }

    #[inline]
    pub fn in_goal_mouth(&self, y: f32) -> bool {
        y >= self.goal_mouth_min_y && y <= self.goal_mouth_max_y
    }

    /// Clamp a player position into the pitch minus margin.
    #[inline]
    pub fn clamp_player(&self, p: Position) -> Position {
        p.clamped(
            self.player_margin,
            self.width - self.player_margin,
            self.player_margin,
            self.height - self.player_margin,
        )
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(format!("pitch must have positive size, got {}x{}", self.width, self.height));
        }
        if self.player_margin < 0.0 || self.player_margin * 2.0 >= self.width.min(self.height) {
            return Err(format!("player margin {} does not fit the pitch", self.player_margin));
        }
        if !(self.goal_mouth_min_y < self.goal_mouth_max_y)
            || self.goal_mouth_min_y < 0.0
            || self.goal_mouth_max_y > self.height
        {
            return Err(format!(
                "goal mouth {}..{} must be a non-empty range inside the goal line",
                self.goal_mouth_min_y, self.goal_mouth_max_y
            ));
        }
        Ok(())
    }
}
