//! Action Decision for autonomous ball holders
//!
//! Heuristic policy in a fixed order: clear under pressure near the own goal,
//! shoot when a chance is good enough, pass to the best-scored teammate, or
//! dribble. The dribble fallback always applies, so a decision always exists.

use rand::Rng;

use super::actions::ActionRequest;
use crate::engine::config::PitchConfig;
use crate::engine::debug_flags::decision_debug_enabled;
use crate::engine::probability::{self, ScoredAction};
use crate::engine::snapshot::MatchSnapshot;
use crate::engine::sort_keys::nearest_player;
use crate::engine::types::Position;
use crate::models::{Player, PlayerRole};

// ============================================================================
// Heuristic Thresholds
// ============================================================================

pub mod clearance {
    /// Back-liners this close to their own goal may clear.
    pub const OWN_GOAL_RADIUS: f32 = 32.0;
    /// ...when an opponent is this close.
    pub const PRESSURE_RADIUS: f32 = 8.0;
    /// Closest-opponent search cap.
    pub const SEARCH_CAP: f32 = 50.0;
    pub const FORWARD_REACH: f32 = 24.0;
    pub const LATERAL_REACH: f32 = 14.0;
    pub const POWER: f32 = 88.0;
    /// Target x and y stay this far inside the pitch.
    pub const TARGET_INSET: f32 = 4.0;
}

pub mod shot {
    pub const RANGE: f32 = 35.0;
    pub const EVAL_POWER: f32 = 92.0;
    pub const ACCEPT_BASE: f32 = 22.0;
    pub const POWER_BASE: f32 = 88.0;
    pub const POWER_SPREAD: f32 = 8.0;
    /// Offsets from the goal centre toward the far post, near post and centre.
    pub const FAR_POST: f32 = 7.0;
    pub const NEAR_POST: f32 = 4.0;
    pub const CENTRE_LEAN: f32 = 2.5;
    /// Half-widths of the clamp window for each candidate.
    pub const FAR_POST_WINDOW: f32 = 10.0;
    pub const NEAR_POST_WINDOW: f32 = 8.0;
    pub const CENTRE_WINDOW: f32 = 7.0;
    /// Added to the acceptance threshold per role.
    pub const FORWARD_BONUS: f32 = -6.0;
    pub const BACK_LINE_BONUS: f32 = 8.0;
}

pub mod pass {
    pub const POWER_PER_UNIT: f32 = 1.3;
    pub const POWER_BASE: f32 = 15.0;
    pub const MIN_SAFE_PROBABILITY: f32 = 32.0;
    pub const STANDALONE_SCORE: f32 = 25.0;
    pub const COMMIT_SCORE: f32 = 18.0;
    pub const SAFE_BONUS: f32 = 8.0;
    pub const RISK_PENALTY: f32 = 0.4;
    /// Short square-ish passes a forward can bounce off.
    pub const WALL_DISTANCE: f32 = 18.0;
    pub const WALL_LATERAL: f32 = 12.0;
    pub const NEAR_GOAL: f32 = 42.0;

    // Back line (GK, DEF): completion first, and never push the ball up blindly.
    pub const BACK_PROB_WEIGHT: f32 = 0.9;
    pub const BACK_SAFE_BONUS: f32 = 18.0;
    pub const BACK_RISKY_BONUS: f32 = -8.0;
    pub const BACK_RETREAT_WEIGHT: f32 = 0.8;
    pub const BACK_RETREAT_CAP: f32 = 12.0;

    // Midfield: progression and switches of play.
    pub const MID_PROB_WEIGHT: f32 = 0.65;
    pub const MID_PROGRESSION_WEIGHT: f32 = 4.5;
    pub const MID_SWITCH_WEIGHT: f32 = 0.7;
    pub const MID_SAFE_BONUS: f32 = 10.0;

    // Forwards: progression, wall passes, combinations near goal.
    pub const FWD_PROB_WEIGHT: f32 = 0.55;
    pub const FWD_PROGRESSION_WEIGHT: f32 = 3.6;
    pub const WALL_BONUS: f32 = 14.0;
    pub const NEAR_GOAL_BONUS: f32 = 6.0;
}

pub mod lane {
    pub const MIN_THRESHOLD: f32 = 3.0;
    pub const THRESHOLD_BASE: f32 = 1.8;
    pub const THRESHOLD_PER_UNIT: f32 = 0.04;
    pub const OVERSHOOT_WEIGHT: f32 = 12.0;
    pub const DEFENSE_WEIGHT: f32 = 0.2;
    pub const SAFE_BELOW: f32 = 22.0;
}

pub mod dribble {
    pub const ADVANCE: f32 = 12.0;
    pub const RANDOM_DRIFT: f32 = 10.0;
    pub const BLOCKER_RADIUS: f32 = 8.0;
    pub const BLOCKER_SHIFT: f32 = 15.0;
    pub const POWER: f32 = 45.0;
    pub const MIN_X: f32 = 2.0;
    pub const MAX_X: f32 = 118.0;
    pub const MIN_Y: f32 = 5.0;
    pub const MAX_Y: f32 = 75.0;
}

/// Interception exposure of a straight pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneSafety {
    pub is_safe: bool,
    pub risk: f32,
}

/// Walk the segment `start`→`target` and sum the risk posed by every
/// opponent whose projection falls on it.
pub fn pass_lane_safety<'a>(
    start: Position,
    target: Position,
    opponents: impl Iterator<Item = &'a Player>,
) -> LaneSafety {
    let mut dist = start.distance_to(&target);
    if dist == 0.0 {
        dist = 1.0;
    }
    let dir = start.direction_to(&target);
    let threshold =
        (lane::THRESHOLD_BASE + dist * lane::THRESHOLD_PER_UNIT).max(lane::MIN_THRESHOLD);

    let mut risk = 0.0;
    for opp in opponents {
        let to_opp = Position::new(opp.position.x - start.x, opp.position.y - start.y);
        let projection = to_opp.x * dir.x + to_opp.y * dir.y;
        if projection < 0.0 || projection > dist {
            continue;
        }
        let closest = start.offset(dir.scaled(projection));
        let lateral = closest.distance_to(&opp.position);
        if lateral < threshold {
            risk += (threshold - lateral) * lane::OVERSHOOT_WEIGHT
                + opp.stats.defense * lane::DEFENSE_WEIGHT;
        }
    }

    LaneSafety { is_safe: risk < lane::SAFE_BELOW, risk }
}

/// Far post, near post and centre-lean targets on the line at `goal_x`,
/// mirrored by which half of the goal the shooter stands in.
pub fn shot_targets(goal_x: f32, shooter_y: f32, center_y: f32) -> [Position; 3] {
    let upper = shooter_y < center_y;
    let sign = if upper { 1.0 } else { -1.0 };
    let windowed = |offset: f32, window: f32| {
        Position::new(goal_x, (center_y + offset).clamp(center_y - window, center_y + window))
    };
    [
        windowed(sign * shot::FAR_POST, shot::FAR_POST_WINDOW),
        windowed(-sign * shot::NEAR_POST, shot::NEAR_POST_WINDOW),
        windowed(sign * shot::CENTRE_LEAN, shot::CENTRE_WINDOW),
    ]
}

/// Acceptance bonus: forwards shoot more readily, back-liners less.
#[inline]
fn shot_role_bonus(role: PlayerRole) -> f32 {
    match role {
        PlayerRole::Forward => shot::FORWARD_BONUS,
        PlayerRole::Midfielder => 0.0,
        PlayerRole::Defender | PlayerRole::Goalkeeper => shot::BACK_LINE_BONUS,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PassOption {
    pub target: Position,
    pub power: f32,
    pub probability: f32,
    pub safety: LaneSafety,
    pub score: f32,
}

/// Score a pass from `actor` to `mate`.
pub fn evaluate_pass(
    actor: &Player,
    mate: &Player,
    snapshot: &MatchSnapshot,
    pitch: &PitchConfig,
) -> PassOption {
    let fwd = actor.side.forward_dir();
    let goal = pitch.goal_center(actor.side.attacking_goal_x(pitch.width));
    let dist_to_goal = actor.distance_to(&goal);

    let dist = actor.distance_to(&mate.position);
    let power = (dist * pass::POWER_PER_UNIT + pass::POWER_BASE).min(100.0);
    let probability = probability::score(
        ScoredAction::Pass,
        actor,
        mate.position,
        &snapshot.players,
        &snapshot.ball,
        power,
        pitch,
    );
    let safety = pass_lane_safety(
        actor.position,
        mate.position,
        snapshot.players.iter().filter(|p| p.side != actor.side),
    );

    let dy = (mate.position.y - actor.position.y).abs();
    let progression = (mate.position.x - actor.position.x) * fwd;
    let wall = dist < pass::WALL_DISTANCE && dy < pass::WALL_LATERAL;

    let safe_bonus = |on_safe: f32, on_risky: f32| if safety.is_safe { on_safe } else { on_risky };
    let role_score = match actor.role {
        PlayerRole::Defender | PlayerRole::Goalkeeper => {
            probability * pass::BACK_PROB_WEIGHT
                + safe_bonus(pass::BACK_SAFE_BONUS, pass::BACK_RISKY_BONUS)
                + (-progression * pass::BACK_RETREAT_WEIGHT).min(pass::BACK_RETREAT_CAP)
        }
        PlayerRole::Midfielder => {
            probability * pass::MID_PROB_WEIGHT
                + progression * pass::MID_PROGRESSION_WEIGHT
                + dy * pass::MID_SWITCH_WEIGHT
                + safe_bonus(pass::MID_SAFE_BONUS, 0.0)
        }
        PlayerRole::Forward => {
            let wall_bonus = if wall { pass::WALL_BONUS } else { 0.0 };
            let goal_bonus =
                if dist_to_goal < pass::NEAR_GOAL { pass::NEAR_GOAL_BONUS } else { 0.0 };
            probability * pass::FWD_PROB_WEIGHT
                + progression * pass::FWD_PROGRESSION_WEIGHT
                + wall_bonus
                + goal_bonus
        }
    };
    let safety_adjustment =
        if safety.is_safe { pass::SAFE_BONUS } else { -safety.risk * pass::RISK_PENALTY };

    PassOption {
        target: mate.position,
        power,
        probability,
        safety,
        score: role_score + safety_adjustment,
    }
}

/// Choose the next action for the autonomous holder `actor`.
pub fn decide_action<R: Rng + ?Sized>(
    actor: &Player,
    snapshot: &MatchSnapshot,
    pitch: &PitchConfig,
    rng: &mut R,
) -> ActionRequest {
    let request = choose(actor, snapshot, pitch, rng).with_actor(actor.id);
    if decision_debug_enabled() {
        log::debug!(
            "[DECISION] tick={} {} {} -> {} ({:.1}, {:.1}) power={:.0}",
            snapshot.tick,
            actor.id,
            actor.name,
            if request.is_clearance { "clearance" } else { request.kind.as_str() },
            request.target.x,
            request.target.y,
            request.power
        );
    }
    request
}

fn choose<R: Rng + ?Sized>(
    actor: &Player,
    snapshot: &MatchSnapshot,
    pitch: &PitchConfig,
    rng: &mut R,
) -> ActionRequest {
    let fwd = actor.side.forward_dir();
    let own_goal = pitch.goal_center(actor.side.own_goal_x(pitch.width));
    let goal_x = actor.side.attacking_goal_x(pitch.width);
    let dist_to_goal = actor.distance_to(&pitch.goal_center(goal_x));
    let pos = actor.position;

    // 1. Clearance
    let closest_opp = snapshot
        .players
        .iter()
        .filter(|p| p.side != actor.side)
        .map(|p| actor.distance_to(&p.position))
        .fold(clearance::SEARCH_CAP, f32::min);
    if actor.role.is_back_line()
        && actor.distance_to(&own_goal) < clearance::OWN_GOAL_RADIUS
        && closest_opp < clearance::PRESSURE_RADIUS
    {
        let lateral =
            if pos.y < pitch.center_y() { -clearance::LATERAL_REACH } else { clearance::LATERAL_REACH };
        let target = Position::new(
            (pos.x + fwd * clearance::FORWARD_REACH)
                .clamp(clearance::TARGET_INSET, pitch.width - clearance::TARGET_INSET),
            (pos.y + lateral).clamp(clearance::TARGET_INSET, pitch.height - clearance::TARGET_INSET),
        );
        return ActionRequest::clearance(target, clearance::POWER);
    }

    // 2. Shot
    if dist_to_goal < shot::RANGE {
        let mut best: Option<(Position, f32)> = None;
        for target in shot_targets(goal_x, pos.y, pitch.center_y()) {
            let p = probability::score(
                ScoredAction::Shoot,
                actor,
                target,
                &snapshot.players,
                &snapshot.ball,
                shot::EVAL_POWER,
                pitch,
            );
            if best.map_or(true, |(_, bp)| p > bp) {
                best = Some((target, p));
            }
        }
        if let Some((target, p)) = best {
            if p > shot::ACCEPT_BASE + shot_role_bonus(actor.role) {
                let power = shot::POWER_BASE + rng.gen::<f32>() * shot::POWER_SPREAD;
                return ActionRequest::shoot(target, power);
            }
        }
    }

    // 3. Pass
    let mut best_pass: Option<PassOption> = None;
    for mate in snapshot.players.iter().filter(|p| p.side == actor.side && p.id != actor.id) {
        let option = evaluate_pass(actor, mate, snapshot, pitch);
        let eligible = (option.probability > pass::MIN_SAFE_PROBABILITY && option.safety.is_safe)
            || option.score > pass::STANDALONE_SCORE;
        if eligible && best_pass.as_ref().map_or(true, |b| option.score > b.score) {
            best_pass = Some(option);
        }
    }
    if let Some(option) = best_pass.filter(|o| o.score > pass::COMMIT_SCORE) {
        return ActionRequest::pass(option.target, option.power);
    }

    // 4. Dribble
    let random_drift =
        if rng.gen::<f32>() > 0.5 { dribble::RANDOM_DRIFT } else { -dribble::RANDOM_DRIFT };
    let blocker = nearest_player(&snapshot.players, &pos, |p| {
        p.side != actor.side && actor.distance_to(&p.position) < dribble::BLOCKER_RADIUS
    });
    let drift_y = match blocker {
        Some(b) if b.position.y > pos.y => pos.y - dribble::BLOCKER_SHIFT,
        Some(_) => pos.y + dribble::BLOCKER_SHIFT,
        None => pos.y + random_drift,
    };
    let target = Position::new(
        (pos.x + dribble::ADVANCE * fwd).clamp(dribble::MIN_X, dribble::MAX_X),
        drift_y.clamp(dribble::MIN_Y, dribble::MAX_Y),
    );
    ActionRequest::dribble(target, dribble::POWER)
}
