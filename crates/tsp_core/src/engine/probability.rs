//! Probability calculation for on-ball actions
//!
//! All functions are pure - they take the actor, the geometry and the roster
//! and return a success chance in percent. The resolver rolls against it and
//! the decision engine ranks options with it.

use serde::{Deserialize, Serialize};

use crate::engine::ball::Ball;
use crate::engine::config::PitchConfig;
use crate::engine::types::{point_to_segment_distance, Position};
use crate::models::{ActionKind, Player};

// ============================================================================
// Model Coefficients
// ============================================================================

/// Opponents closer than this to the actor apply pressure.
pub const PRESSURE_RADIUS: f32 = 5.0;
/// Penalty per unit of encroachment inside the pressure radius.
pub const PRESSURE_WEIGHT: f32 = 12.0;
/// Penalty per unit of deviation from the ideal power.
pub const POWER_PENALTY_PER_UNIT: f32 = 0.7;

pub mod pass {
    pub const SKILL_WEIGHT: f32 = 2.1;
    pub const DISTANCE_WEIGHT: f32 = 0.45;
    /// Ideal power = min(IDEAL_POWER_CAP, distance * IDEAL_POWER_PER_UNIT + IDEAL_POWER_BASE)
    pub const IDEAL_POWER_PER_UNIT: f32 = 1.4;
    pub const IDEAL_POWER_BASE: f32 = 12.0;
    pub const IDEAL_POWER_CAP: f32 = 90.0;
    /// Opponents this close to the pass segment contest it.
    pub const LANE_RADIUS: f32 = 3.5;
    pub const LANE_DEFENSE_WEIGHT: f32 = 0.75;
    pub const MIN: f32 = 1.0;
    pub const MAX: f32 = 99.0;
}

pub mod shoot {
    pub const SKILL_WEIGHT: f32 = 2.4;
    pub const DISTANCE_WEIGHT: f32 = 1.6;
    /// Per unit of distance from the goal's centre line.
    pub const ANGLE_WEIGHT: f32 = 3.0;
    pub const IDEAL_POWER: f32 = 88.0;
    /// Shots are less sensitive to power than passes.
    pub const POWER_PENALTY_SHARE: f32 = 0.4;
    pub const MIN: f32 = 1.0;
    pub const MAX: f32 = 96.0;
}

pub mod dribble {
    pub const SKILL_WEIGHT: f32 = 2.6;
    pub const PRESSURE_SHARE: f32 = 3.5;
    pub const MIN: f32 = 5.0;
    pub const MAX: f32 = 99.0;
}

pub mod tackle {
    pub const DEFENSE_WEIGHT: f32 = 1.5;
    pub const VICTIM_DRIBBLING_WEIGHT: f32 = 1.2;
    pub const BASE: f32 = 50.0;
    pub const MIN: f32 = 10.0;
    pub const MAX: f32 = 85.0;
}

/// Action families the model can score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoredAction {
    Pass,
    Shoot,
    Dribble,
    /// Against whoever currently holds the ball.
    Tackle,
}

impl From<ActionKind> for ScoredAction {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Pass => ScoredAction::Pass,
            ActionKind::Shoot => ScoredAction::Shoot,
            ActionKind::Dribble => ScoredAction::Dribble,
        }
    }
}

// ============================================================================
// Scoring
// ============================================================================

/// Summed encroachment of opponents inside the pressure radius.
pub fn pressure_penalty(actor: &Player, players: &[Player]) -> f32 {
    players
        .iter()
        .filter(|p| p.side != actor.side)
        .map(|opp| actor.distance_to(&opp.position))
        .filter(|d| *d < PRESSURE_RADIUS)
        .map(|d| (PRESSURE_RADIUS - d) * PRESSURE_WEIGHT)
        .sum()
}

/// Power that a pass over `distance` ideally needs.
#[inline]
pub fn ideal_pass_power(distance: f32) -> f32 {
    (distance * pass::IDEAL_POWER_PER_UNIT + pass::IDEAL_POWER_BASE).min(pass::IDEAL_POWER_CAP)
}

/// Success chance (percent) of `action` by `actor` toward `target`.
///
/// Result ranges: pass [1, 99], shoot [1, 96], dribble [5, 99], tackle
/// [10, 85] (0 when nobody holds the ball).
pub fn score(
    action: ScoredAction,
    actor: &Player,
    target: Position,
    players: &[Player],
    ball: &Ball,
    power: f32,
    pitch: &PitchConfig,
) -> f32 {
    let stamina_factor = actor.stamina_factor();
    let pressure = pressure_penalty(actor, players);

    match action {
        ScoredAction::Tackle => {
            let Some(victim) =
                ball.owner.and_then(|owner| players.iter().find(|p| p.id == owner))
            else {
                return 0.0;
            };
            let raw = actor.stats.defense * tackle::DEFENSE_WEIGHT
                - victim.stats.dribbling * tackle::VICTIM_DRIBBLING_WEIGHT
                + tackle::BASE;
            (raw * stamina_factor).clamp(tackle::MIN, tackle::MAX)
        }
        ScoredAction::Pass => {
            let mut distance = actor.distance_to(&target);
            if distance == 0.0 {
                distance = 1.0;
            }
            let power_penalty = (power - ideal_pass_power(distance)).abs() * POWER_PENALTY_PER_UNIT;

            let mut raw = actor.stats.passing * pass::SKILL_WEIGHT
                - distance * pass::DISTANCE_WEIGHT
                - pressure
                - power_penalty;
            for def in players.iter().filter(|p| p.side != actor.side) {
                if point_to_segment_distance(&actor.position, &target, &def.position)
                    < pass::LANE_RADIUS
                {
                    raw -= def.stats.defense * pass::LANE_DEFENSE_WEIGHT;
                }
            }
            (raw * stamina_factor).clamp(pass::MIN, pass::MAX)
        }
        ScoredAction::Shoot => {
            let goal = pitch.goal_center(actor.side.attacking_goal_x(pitch.width));
            let distance_to_goal = actor.distance_to(&goal);
            let angle_penalty = (actor.position.y - pitch.center_y()).abs() * shoot::ANGLE_WEIGHT;
            let power_penalty = (power - shoot::IDEAL_POWER).abs() * POWER_PENALTY_PER_UNIT;

            let raw = actor.stats.shooting * shoot::SKILL_WEIGHT
                - distance_to_goal * shoot::DISTANCE_WEIGHT
                - angle_penalty
                - pressure
                - power_penalty * shoot::POWER_PENALTY_SHARE;
            (raw * stamina_factor).clamp(shoot::MIN, shoot::MAX)
        }
        ScoredAction::Dribble => {
            let raw = actor.stats.dribbling * dribble::SKILL_WEIGHT
                - pressure * dribble::PRESSURE_SHARE;
            (raw * stamina_factor).clamp(dribble::MIN, dribble::MAX)
        }
    }
}
