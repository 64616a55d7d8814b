//! Player Movement System
//!
//! Off-ball target selection and the per-tick step for every agent except
//! the ball holder. Targets are chosen in priority order:
//! 1. goalkeepers hold the anchor or take a save stance
//! 2. the single nearest agent to a loose ball chases it
//! 3. the side without the ball marks the nearest threat
//! 4. the side with the ball makes support runs around the anchor
//!
//! All targets are derived from the positions at the start of the step.

use crate::engine::config::{MovementConfig, PitchConfig};
use crate::engine::snapshot::MatchSnapshot;
use crate::engine::sort_keys::nearest_player;
use crate::engine::steering::step_toward;
use crate::engine::types::Position;
use crate::models::{Player, PlayerId, PlayerRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementRole {
    Keeper,
    Chaser,
    Marker,
    Support,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementIntent {
    pub role: MovementRole,
    pub target: Position,
    /// Chasers run faster and tire faster, even a keeper sent after the ball.
    pub is_chaser: bool,
}

/// The one agent closest to a loose ball, or `None` while someone holds it.
pub fn designated_chaser(snapshot: &MatchSnapshot) -> Option<PlayerId> {
    if snapshot.ball.owner.is_some() {
        return None;
    }
    nearest_player(&snapshot.players, &snapshot.ball.position, |_| true).map(|p| p.id)
}

/// Where `player` wants to go this tick.
pub fn movement_intent(
    snapshot: &MatchSnapshot,
    player: &Player,
    chaser: Option<PlayerId>,
    pitch: &PitchConfig,
    cfg: &MovementConfig,
) -> MovementIntent {
    let ball = snapshot.ball.position;
    let is_chaser = chaser == Some(player.id);
    let attacking_side = snapshot.possessing_side();

    if player.role == PlayerRole::Goalkeeper {
        let goal_x = player.side.own_goal_x(pitch.width);
        let target = if (ball.x - goal_x).abs() < cfg.keeper_alert_distance {
            Position::new(
                goal_x + player.side.forward_dir() * cfg.keeper_step_out,
                ball.y * cfg.keeper_ball_bias + pitch.center_y() * (1.0 - cfg.keeper_ball_bias),
            )
        } else {
            player.anchor
        };
        return MovementIntent { role: MovementRole::Keeper, target, is_chaser };
    }

    if is_chaser {
        return MovementIntent { role: MovementRole::Chaser, target: ball, is_chaser };
    }

    if attacking_side != Some(player.side) {
        let defended_goal = pitch.goal_center(player.side.own_goal_x(pitch.width));
        let threat = nearest_player(&snapshot.players, &player.position, |o| o.side != player.side);
        let target = match threat {
            Some(opp) => opp.position.lerp(defended_goal, 1.0 - cfg.marking_threat_weight),
            None => player.anchor,
        };
        return MovementIntent { role: MovementRole::Marker, target, is_chaser };
    }

    let center = pitch.center();
    let target = Position::new(
        player.anchor.x
            + (ball.x - center.x) * cfg.support_ball_x_share
            + player.side.forward_dir() * cfg.support_push,
        player.anchor.y + (ball.y - center.y) * cfg.support_ball_y_share,
    );
    MovementIntent { role: MovementRole::Support, target, is_chaser }
}

/// Move every non-holder one step, tick down cooldowns and drain stamina.
///
/// Stamina drain stops at the floor but never lifts an agent that is
/// already below it.
pub fn apply_movement(snapshot: &mut MatchSnapshot, pitch: &PitchConfig, cfg: &MovementConfig) {
    let chaser = designated_chaser(snapshot);
    let holder = snapshot.ball.owner;

    let intents: Vec<Option<MovementIntent>> = snapshot
        .players
        .iter()
        .map(|p| {
            if Some(p.id) == holder {
                None
            } else {
                Some(movement_intent(snapshot, p, chaser, pitch, cfg))
            }
        })
        .collect();

    for (player, intent) in snapshot.players.iter_mut().zip(intents) {
        let Some(intent) = intent else { continue };

        let factor = if intent.is_chaser { cfg.chaser_speed_factor } else { cfg.base_speed_factor };
        let step = player.stats.speed / 100.0 * factor;
        player.position = pitch.clamp_player(step_toward(player.position, intent.target, step));

        player.action_cooldown = player.action_cooldown.saturating_sub(1);
        player.dash_cooldown = player.dash_cooldown.saturating_sub(1);

        let drain =
            if intent.is_chaser { cfg.chaser_stamina_drain } else { cfg.base_stamina_drain };
        if player.stamina > cfg.stamina_floor {
            player.stamina = (player.stamina - drain).max(cfg.stamina_floor);
        }
    }
}
