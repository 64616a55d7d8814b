//! Test Fixtures Module
//!
//! Centralized test helpers for engine tests.
//!
//! ## Usage
//! ```rust,ignore
//! #[cfg(test)]
//! use crate::engine::match_sim::test_fixtures::*;
//! ```

use crate::engine::ball::Ball;
use crate::engine::match_sim::match_phase::MatchPhase;
use crate::engine::snapshot::MatchSnapshot;
use crate::engine::types::Position;
use crate::models::{Player, PlayerId, Stats, TeamSide};
use crate::tactics::{FormationTemplate, TeamStrategy};

/// Stat value used for every fixture player.
pub const FIXTURE_STAT: f32 = 80.0;

/// Player for track `track` placed at (x, y).
///
/// Role and name follow the default 4-4-2 slot for that track, stats are
/// uniform, stamina is full and cooldowns are zero.
pub fn player_at(track: usize, x: f32, y: f32) -> Player {
    let id = PlayerId(track as u8);
    let side = id.side();
    let template = FormationTemplate::default_for(side);
    let slot = &template.slots[id.slot()];
    Player {
        id,
        name: slot.label.clone(),
        side,
        role: slot.role,
        position: Position::new(x, y),
        anchor: slot.anchor,
        stamina: Player::MAX_STAMINA,
        stats: Stats::uniform(FIXTURE_STAT),
        has_ball: false,
        action_cooldown: 0,
        dash_cooldown: 0,
    }
}

/// Full 22-player roster standing on the default anchors.
pub fn anchored_roster() -> Vec<Player> {
    let mut players = Vec::with_capacity(TeamSide::SQUAD_SIZE * 2);
    for side in [TeamSide::Home, TeamSide::Away] {
        let template = FormationTemplate::default_for(side);
        for (idx, slot) in template.slots.iter().enumerate() {
            players.push(player_at(side.track_offset() + idx, slot.anchor.x, slot.anchor.y));
        }
    }
    players
}

/// Live snapshot over `players` with a loose ball at `ball`.
pub fn live_snapshot(players: Vec<Player>, ball: Position) -> MatchSnapshot {
    MatchSnapshot {
        phase: MatchPhase::Live,
        ball: Ball::held_at(ball, None),
        players,
        ..MatchSnapshot::pre_match(TeamStrategy::Balanced)
    }
}

/// Give the ball to `id` (position snapped, flags set).
pub fn give_ball(snapshot: &mut MatchSnapshot, id: PlayerId) {
    let spot = snapshot.player(id).map(|p| p.position).unwrap_or(snapshot.ball.position);
    snapshot.ball = Ball::held_at(spot, Some(id));
    for p in snapshot.players.iter_mut() {
        p.has_ball = p.id == id;
    }
}
