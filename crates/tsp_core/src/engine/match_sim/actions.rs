//! Action Resolver
//!
//! Turns an on-ball request (pass, shoot, dribble) into a kicked ball. The
//! same rules apply to human and autonomous requests; invalid ones are
//! dropped without touching the snapshot.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::config::{ActionConfig, PitchConfig};
use crate::engine::probability::{self, ScoredAction};
use crate::engine::snapshot::MatchSnapshot;
use crate::engine::types::Position;
use crate::models::{ActionKind, EventDetails, EventType, MatchEvent, PlayerId};

/// Request to act on the ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub kind: ActionKind,
    pub target: Position,
    /// 0..=100
    pub power: f32,
    /// Defaults to the current holder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<PlayerId>,
    /// Pressured back-line pass; reported as a clearance.
    #[serde(default)]
    pub is_clearance: bool,
}

impl ActionRequest {
    pub fn new(kind: ActionKind, target: Position, power: f32) -> Self {
        Self { kind, target, power, actor: None, is_clearance: false }
    }

    pub fn pass(target: Position, power: f32) -> Self {
        Self::new(ActionKind::Pass, target, power)
    }

    pub fn shoot(target: Position, power: f32) -> Self {
        Self::new(ActionKind::Shoot, target, power)
    }

    pub fn dribble(target: Position, power: f32) -> Self {
        Self::new(ActionKind::Dribble, target, power)
    }

    pub fn clearance(target: Position, power: f32) -> Self {
        Self { is_clearance: true, ..Self::pass(target, power) }
    }

    pub fn with_actor(mut self, actor: PlayerId) -> Self {
        self.actor = Some(actor);
        self
    }

    fn event_type(&self) -> EventType {
        match self.kind {
            ActionKind::Pass if self.is_clearance => EventType::Clearance,
            ActionKind::Pass => EventType::Pass,
            ActionKind::Shoot => EventType::Shot,
            ActionKind::Dribble => EventType::Dribble,
        }
    }
}

/// Kick force before any miss penalty.
#[inline]
pub fn base_force(kind: ActionKind, power: f32, cfg: &ActionConfig) -> f32 {
    let scale = match kind {
        ActionKind::Shoot => cfg.shoot_force,
        ActionKind::Pass | ActionKind::Dribble => cfg.pass_force,
    };
    power / 100.0 * scale + cfg.base_force
}

/// Resolve `request` against `snapshot`.
///
/// Returns `None` (snapshot untouched) when no valid actor holds the ball or
/// the actor is still cooling down. Otherwise the actor releases the ball,
/// pays stamina, starts its cooldown, and the ball gets its new velocity.
pub fn resolve_action<R: Rng + ?Sized>(
    snapshot: &mut MatchSnapshot,
    request: &ActionRequest,
    pitch: &PitchConfig,
    cfg: &ActionConfig,
    rng: &mut R,
) -> Option<MatchEvent> {
    let holder = snapshot.ball.owner?;
    let actor_id = request.actor.unwrap_or(holder);
    if actor_id != holder {
        return None;
    }
    let actor = snapshot.player(actor_id)?;
    if !actor.can_act() {
        return None;
    }

    let power = request.power.clamp(0.0, 100.0);
    let target = request.target;
    let probability = probability::score(
        ScoredAction::from(request.kind),
        actor,
        target,
        &snapshot.players,
        &snapshot.ball,
        power,
        pitch,
    );
    let success = rng.gen::<f32>() * 100.0 < probability + cfg.success_bias;

    let force = base_force(request.kind, power, cfg);
    let velocity = if success {
        actor.position.direction_to(&target).scaled(force)
    } else {
        let aim = (target.y - actor.position.y).atan2(target.x - actor.position.x);
        let spread = (100.0 - probability) * cfg.miss_deviation_per_point;
        let angle = aim + (rng.gen::<f32>() - 0.5) * spread;
        Position::new(angle.cos(), angle.sin()).scaled(force * cfg.miss_force_factor)
    };

    let actor_name = actor.name.clone();
    let side = actor.side;
    let actor = snapshot.player_mut(actor_id)?;
    actor.stamina = (actor.stamina - power / cfg.stamina_cost_divisor).max(0.0);
    actor.action_cooldown = cfg.cooldown_ticks;
    actor.has_ball = false;

    snapshot.ball.owner = None;
    snapshot.ball.velocity = velocity;

    log::debug!(
        "{} {} by {} (p={:.1}, power={:.0}, success={})",
        side,
        request.kind.as_str(),
        actor_name,
        probability,
        power,
        success
    );

    Some(MatchEvent {
        tick: snapshot.tick,
        elapsed: snapshot.elapsed,
        event_type: request.event_type(),
        side,
        player_id: Some(actor_id),
        details: Some(EventDetails {
            actor_name: Some(actor_name),
            success: Some(success),
            probability: Some(probability),
            power: Some(power),
        }),
    })
}
