//! Kickoff reconstruction
//!
//! Every kickoff (the first one and each restart after a goal) rebuilds the
//! whole roster from the formation templates. Nothing carries over from the
//! previous roster: stats are redrawn, stamina is full, cooldowns are zero.

use rand::Rng;

use crate::engine::ball::Ball;
use crate::engine::config::PitchConfig;
use crate::engine::match_sim::match_phase::MatchPhase;
use crate::engine::snapshot::MatchSnapshot;
use crate::error::{MatchError, Result};
use crate::models::{MatchEvent, MatchSetup, PlayerId, TeamSide};
use crate::tactics::build_roster;

/// Each side starts at least this far inside its own half.
pub const KICKOFF_HALF_GAP: f32 = 2.0;

/// Fresh live snapshot with `kicking` on the ball at the centre spot.
///
/// Score, clock, tick and tactical settings carry over from `previous`.
/// A malformed template aborts the kickoff with no partial roster.
pub fn kickoff_snapshot<R: Rng + ?Sized>(
    previous: &MatchSnapshot,
    kicking: TeamSide,
    setup: &MatchSetup,
    pitch: &PitchConfig,
    rng: &mut R,
) -> Result<(MatchSnapshot, MatchEvent)> {
    let mut players = build_roster(&setup.home_formation, &setup.away_formation, pitch, rng)?;
    let center = pitch.center();

    for p in players.iter_mut() {
        p.position.x = match p.side {
            TeamSide::Home => p.position.x.min(center.x - KICKOFF_HALF_GAP),
            TeamSide::Away => p.position.x.max(center.x + KICKOFF_HALF_GAP),
        };
    }

    let template = match kicking {
        TeamSide::Home => &setup.home_formation,
        TeamSide::Away => &setup.away_formation,
    };
    let slot = template.kicking_slot().ok_or_else(|| {
        MatchError::InvalidFormation(format!("{}: no kickoff taker for {}", template.name, kicking))
    })?;
    let kicker_id = PlayerId((kicking.track_offset() + slot) as u8);
    let kicker = players
        .iter_mut()
        .find(|p| p.id == kicker_id)
        .ok_or_else(|| MatchError::InvalidFormation(format!("kickoff taker {} missing", kicker_id)))?;
    kicker.position = center;
    kicker.has_ball = true;

    let event = MatchEvent::kickoff(previous.tick, previous.elapsed, kicking);
    log::info!("kickoff: {} ({}) at {}", kicking, kicker_id, previous.tick);

    let snapshot = MatchSnapshot {
        phase: MatchPhase::Live,
        ball: Ball::held_at(center, Some(kicker_id)),
        players,
        last_action_summary: event.description(),
        ..previous.clone()
    };
    Ok((snapshot, event))
}
