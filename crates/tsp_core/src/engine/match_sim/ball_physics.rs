//! Ball Physics System
//!
//! Per-tick integration of a loose ball, goal detection, boundary bounces and
//! possession transfer:
//! - `integrate()` moves the ball, applies drag, then checks the goal lines
//!   and touchlines
//! - `resolve_possession()` hands a loose ball to the nearest eligible agent
//!   or pins an owned ball to its owner

use crate::engine::ball::Ball;
use crate::engine::config::{BallConfig, PitchConfig};
use crate::engine::snapshot::MatchSnapshot;
use crate::engine::sort_keys::nearest_player;
use crate::engine::types::Position;
use crate::models::{PlayerId, TeamSide};

/// Result of one integration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallOutcome {
    InPlay,
    /// The ball crossed a goal line inside the mouth.
    Goal { scorer: TeamSide },
}

/// Advance a loose ball by one tick.
///
/// On a goal the ball keeps its previous position and its velocity is frozen.
/// Otherwise a crossed line reflects that velocity component scaled by the
/// restitution and puts the ball just inside the line.
pub fn integrate(ball: &mut Ball, pitch: &PitchConfig, cfg: &BallConfig) -> BallOutcome {
    if ball.owner.is_some() {
        return BallOutcome::InPlay;
    }

    let mut next = ball.position.offset(ball.velocity);
    let mut velocity = ball.velocity.scaled(cfg.drag);

    if next.x < 0.0 || next.x > pitch.width {
        if pitch.in_goal_mouth(next.y) {
            // HOME attacks the line at x = width.
            let scorer = if next.x > pitch.width { TeamSide::Home } else { TeamSide::Away };
            ball.velocity = Position::ZERO;
            return BallOutcome::Goal { scorer };
        }
        velocity.x *= -cfg.restitution;
        next.x = if next.x < 0.0 { pitch.bounce_inset } else { pitch.width - pitch.bounce_inset };
    }
    if next.y < 0.0 || next.y > pitch.height {
        velocity.y *= -cfg.restitution;
        next.y = if next.y < 0.0 { pitch.bounce_inset } else { pitch.height - pitch.bounce_inset };
    }

    ball.position = next;
    ball.velocity = velocity;
    BallOutcome::InPlay
}

/// Settle ball ownership for this tick.
///
/// A loose ball goes to the nearest agent within the pickup radius whose
/// cooldown is zero (ties to the lower id). An owned ball snaps onto its
/// owner with zero velocity. Returns the id of a new owner, if any.
pub fn resolve_possession(snapshot: &mut MatchSnapshot, cfg: &BallConfig) -> Option<PlayerId> {
    match snapshot.ball.owner {
        Some(owner) => {
            match snapshot.player(owner).map(|p| p.position) {
                Some(spot) => {
                    snapshot.ball.position = spot;
                    snapshot.ball.velocity = Position::ZERO;
                }
                // Owner vanished from the roster: drop the ball where it is.
                None => snapshot.ball.owner = None,
            }
            None
        }
        None => {
            let ball_pos = snapshot.ball.position;
            let taker = nearest_player(&snapshot.players, &ball_pos, |p| {
                p.can_act() && p.distance_to(&ball_pos) < cfg.pickup_radius
            })?;
            let (id, spot) = (taker.id, taker.position);
            snapshot.ball = Ball::held_at(spot, Some(id));
            log::trace!("possession -> {} at tick {}", id, snapshot.tick);
            Some(id)
        }
    }
}

/// Re-derive every `has_ball` flag from the ball owner.
pub fn sync_possession_flags(snapshot: &mut MatchSnapshot) {
    let owner = snapshot.ball.owner;
    for p in snapshot.players.iter_mut() {
        p.has_ball = Some(p.id) == owner;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_sim::test_fixtures::{give_ball, live_snapshot, player_at};

    fn moving(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball { position: Position::new(x, y), velocity: Position::new(vx, vy), owner: None }
    }

    #[test]
    fn test_drag_applied_after_move() {
        let mut ball = moving(60.0, 40.0, 2.0, 0.0);
        let out = integrate(&mut ball, &PitchConfig::default(), &BallConfig::default());
        assert_eq!(out, BallOutcome::InPlay);
        assert!((ball.position.x - 62.0).abs() < 1e-5);
        assert!((ball.velocity.x - 1.94).abs() < 1e-5);
    }

    #[test]
    fn test_goal_at_home_attacking_end() {
        let mut ball = moving(118.0, 40.0, 5.0, 0.0);
        let out = integrate(&mut ball, &PitchConfig::default(), &BallConfig::default());
        assert_eq!(out, BallOutcome::Goal { scorer: TeamSide::Home });
        assert_eq!(ball.velocity, Position::ZERO);
        assert_eq!(ball.position, Position::new(118.0, 40.0));
    }

    #[test]
    fn test_goal_at_home_goal_scores_for_away() {
        let mut ball = moving(1.0, 33.0, -3.0, 0.0);
        let out = integrate(&mut ball, &PitchConfig::default(), &BallConfig::default());
        assert_eq!(out, BallOutcome::Goal { scorer: TeamSide::Away });
    }

    #[test]
    fn test_goal_mouth_edges_are_inclusive() {
        let mut ball = moving(119.0, 47.5, 2.0, 0.0);
        let out = integrate(&mut ball, &PitchConfig::default(), &BallConfig::default());
        assert_eq!(out, BallOutcome::Goal { scorer: TeamSide::Home });
    }

    #[test]
    fn test_wide_of_goal_bounces() {
        let mut ball = moving(119.0, 20.0, 4.0, 0.0);
        let out = integrate(&mut ball, &PitchConfig::default(), &BallConfig::default());
        assert_eq!(out, BallOutcome::InPlay);
        assert!((ball.position.x - 119.9).abs() < 1e-4);
        assert!((ball.velocity.x - (-4.0 * 0.97 * 0.5)).abs() < 1e-5);
    }

    #[test]
    fn test_touchline_bounce() {
        let mut ball = moving(50.0, 1.0, 0.0, -3.0);
        integrate(&mut ball, &PitchConfig::default(), &BallConfig::default());
        assert!((ball.position.y - 0.1).abs() < 1e-6);
        assert!(ball.velocity.y > 0.0);

        let mut ball = moving(50.0, 79.0, 0.0, 3.0);
        integrate(&mut ball, &PitchConfig::default(), &BallConfig::default());
        assert!((ball.position.y - 79.9).abs() < 1e-4);
        assert!(ball.velocity.y < 0.0);
    }

    #[test]
    fn test_owned_ball_not_integrated() {
        let mut ball = Ball::held_at(Position::new(30.0, 30.0), Some(PlayerId(4)));
        ball.velocity = Position::new(3.0, 3.0);
        integrate(&mut ball, &PitchConfig::default(), &BallConfig::default());
        assert_eq!(ball.position, Position::new(30.0, 30.0));
    }

    #[test]
    fn test_pickup_within_radius() {
        let mut snap = live_snapshot(
            vec![player_at(5, 61.0, 40.0), player_at(14, 70.0, 40.0)],
            Position::new(60.0, 40.0),
        );
        snap.ball.velocity = Position::new(0.5, 0.0);

        let taker = resolve_possession(&mut snap, &BallConfig::default());
        assert_eq!(taker, Some(PlayerId(5)));
        assert_eq!(snap.ball.position, Position::new(61.0, 40.0));
        assert_eq!(snap.ball.velocity, Position::ZERO);
    }

    #[test]
    fn test_pickup_skips_cooling_down_agents() {
        let mut close = player_at(5, 60.5, 40.0);
        close.action_cooldown = 3;
        let mut snap =
            live_snapshot(vec![close, player_at(14, 62.0, 40.0)], Position::new(60.0, 40.0));

        assert_eq!(resolve_possession(&mut snap, &BallConfig::default()), Some(PlayerId(14)));
    }

    #[test]
    fn test_pickup_tie_goes_to_lower_id() {
        let mut snap = live_snapshot(
            vec![player_at(16, 59.0, 40.0), player_at(7, 61.0, 40.0)],
            Position::new(60.0, 40.0),
        );
        assert_eq!(resolve_possession(&mut snap, &BallConfig::default()), Some(PlayerId(7)));
    }

    #[test]
    fn test_nobody_in_range() {
        let mut snap = live_snapshot(vec![player_at(5, 65.0, 40.0)], Position::new(60.0, 40.0));
        assert_eq!(resolve_possession(&mut snap, &BallConfig::default()), None);
        assert!(snap.ball.is_loose());
    }

    #[test]
    fn test_owned_ball_follows_owner() {
        let mut snap = live_snapshot(vec![player_at(9, 50.0, 40.0)], Position::new(50.0, 40.0));
        give_ball(&mut snap, PlayerId(9));
        snap.players[0].position = Position::new(52.0, 41.0);

        assert_eq!(resolve_possession(&mut snap, &BallConfig::default()), None);
        assert_eq!(snap.ball.position, Position::new(52.0, 41.0));
    }

    #[test]
    fn test_flags_follow_owner() {
        let mut snap = live_snapshot(
            vec![player_at(1, 10.0, 10.0), player_at(12, 20.0, 20.0)],
            Position::new(20.0, 20.0),
        );
        snap.players[0].has_ball = true;
        snap.ball.owner = Some(PlayerId(12));
        sync_possession_flags(&mut snap);
        assert!(!snap.players[0].has_ball);
        assert!(snap.players[1].has_ball);
        assert_eq!(snap.possession_count(), 1);
    }
}
