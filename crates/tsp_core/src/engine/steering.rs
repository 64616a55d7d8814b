//! Steering helpers (minimal set)
//!
//! Off-ball agents move a bounded distance per tick toward their target;
//! they never teleport.

use crate::engine::types::Position;

/// Seek: displacement toward `target` with length `speed`.
pub fn seek(current: Position, target: Position, speed: f32) -> Position {
    if speed <= 0.0 {
        return Position::ZERO;
    }
    current.direction_to(&target).scaled(speed)
}

/// Step toward `target` by at most `max_step`.
///
/// Within reach the step lands exactly on the target instead of
/// oscillating around it.
pub fn step_toward(current: Position, target: Position, max_step: f32) -> Position {
    if max_step <= 0.0 {
        return current;
    }
    if current.distance_to(&target) <= max_step {
        return target;
    }
    current.offset(seek(current, target, max_step))
}
