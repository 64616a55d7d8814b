//! Ball record
//!
//! Position, per-tick velocity and the current holder. While an owner exists
//! the ball sits on the owner and its velocity is zero.

use serde::{Deserialize, Serialize};

use crate::engine::types::Position;
use crate::models::PlayerId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub position: Position,
    /// Displacement per tick.
    pub velocity: Position,
    pub owner: Option<PlayerId>,
}

impl Ball {
    /// Stationary ball on `spot` held by `owner`.
    pub fn held_at(spot: Position, owner: Option<PlayerId>) -> Self {
        Self { position: spot, velocity: Position::ZERO, owner }
    }

    #[inline]
    pub fn is_loose(&self) -> bool {
        self.owner.is_none()
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::held_at(Position::new(60.0, 40.0), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_ball_is_stationary() {
        let ball = Ball::held_at(Position::new(60.0, 40.0), Some(PlayerId(9)));
        assert!(!ball.is_loose());
        assert_eq!(ball.speed(), 0.0);
    }

    #[test]
    fn test_default_ball_is_loose_at_centre() {
        let ball = Ball::default();
        assert!(ball.is_loose());
        assert_eq!(ball.position, Position::new(60.0, 40.0));
    }
}
