//! Interactive input session
//!
//! Press-and-hold power charging for the human side. A press arms the
//! session, every tick while held adds power, and the release turns the press
//! into an [`ActionRequest`]. The session is cleared after each release.

use serde::{Deserialize, Serialize};

use super::actions::ActionRequest;
use crate::engine::config::PitchConfig;
use crate::engine::snapshot::MatchSnapshot;
use crate::engine::types::Position;
use crate::models::{PlayerId, TeamSide};

/// What the press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PressTarget {
    /// A player; the position is taken at press time.
    Player { id: PlayerId, side: TeamSide, position: Position },
    /// Open pitch.
    Point(Position),
}

#[derive(Debug, Clone, Default)]
pub struct InputSession {
    pending: Option<PressTarget>,
    power: f32,
}

impl InputSession {
    pub const CHARGE_PER_TICK: f32 = 8.0;
    pub const MAX_POWER: f32 = 100.0;
    /// Pitch presses closer than this to the attacked goal line are shots;
    /// anything further out is a dribble.
    pub const SHOOT_RANGE: f32 = 22.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a press. Ignored unless `human` currently holds the ball.
    pub fn begin(&mut self, snapshot: &MatchSnapshot, human: TeamSide, target: PressTarget) -> bool {
        if snapshot.possessing_side() != Some(human) {
            return false;
        }
        self.pending = Some(target);
        self.power = 0.0;
        true
    }

    /// One tick of holding the press.
    pub fn charge_tick(&mut self) {
        if self.pending.is_some() {
            self.power = (self.power + Self::CHARGE_PER_TICK).min(Self::MAX_POWER);
        }
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    #[inline]
    pub fn power(&self) -> f32 {
        self.power
    }

    pub fn cancel(&mut self) {
        self.pending = None;
        self.power = 0.0;
    }

    /// Release the press.
    ///
    /// A teammate of `human` other than the holder becomes a pass target;
    /// anything else is a shot inside [`Self::SHOOT_RANGE`] of the goal `human`
    /// attacks, or a dribble. Nothing is produced when the session was not
    /// armed or nobody holds the ball.
    pub fn release(
        &mut self,
        snapshot: &MatchSnapshot,
        human: TeamSide,
        pitch: &PitchConfig,
    ) -> Option<ActionRequest> {
        let target = self.pending.take()?;
        let power = std::mem::take(&mut self.power);
        let holder = snapshot.holder()?;

        let request = match target {
            PressTarget::Player { id, side, position } if side == human && id != holder.id => {
                ActionRequest::pass(position, power)
            }
            PressTarget::Player { position: point, .. } | PressTarget::Point(point) => {
                let goal_x = human.attacking_goal_x(pitch.width);
                if (point.x - goal_x).abs() < Self::SHOOT_RANGE {
                    ActionRequest::shoot(point, power)
                } else {
                    ActionRequest::dribble(point, power)
                }
            }
        };
        Some(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_sim::test_fixtures::{give_ball, live_snapshot, player_at};
    use crate::models::ActionKind;

    fn home_holding() -> MatchSnapshot {
        let mut snap = live_snapshot(
            vec![player_at(9, 80.0, 40.0), player_at(10, 90.0, 30.0), player_at(14, 85.0, 45.0)],
            Position::new(80.0, 40.0),
        );
        give_ball(&mut snap, PlayerId(9));
        snap
    }

    fn pitch() -> PitchConfig {
        PitchConfig::default()
    }

    fn released_kind(
        session: &mut InputSession,
        snap: &MatchSnapshot,
        human: TeamSide,
    ) -> ActionKind {
        session.release(snap, human, &pitch()).unwrap().kind
    }

    fn press_on(snap: &MatchSnapshot, id: PlayerId) -> PressTarget {
        let p = snap.player(id).unwrap();
        PressTarget::Player { id, side: p.side, position: p.position }
    }

    #[test]
    fn test_charge_caps_at_max() {
        let snap = home_holding();
        let mut session = InputSession::new();
        assert!(session.begin(&snap, TeamSide::Home, PressTarget::Point(Position::new(100.0, 40.0))));
        for _ in 0..20 {
            session.charge_tick();
        }
        assert_eq!(session.power(), 100.0);
    }

    #[test]
    fn test_release_on_teammate_passes() {
        let snap = home_holding();
        let mut session = InputSession::new();
        session.begin(&snap, TeamSide::Home, press_on(&snap, PlayerId(10)));
        for _ in 0..5 {
            session.charge_tick();
        }
        let req = session.release(&snap, TeamSide::Home, &pitch()).unwrap();
        assert_eq!(req.kind, ActionKind::Pass);
        assert_eq!(req.target, Position::new(90.0, 30.0));
        assert_eq!(req.power, 40.0);
        assert!(!session.is_armed());
        assert_eq!(session.power(), 0.0);
    }

    #[test]
    fn test_release_on_pitch_picks_shot_or_dribble() {
        let snap = home_holding();
        let mut session = InputSession::new();

        session.begin(&snap, TeamSide::Home, PressTarget::Point(Position::new(105.0, 40.0)));
        assert_eq!(released_kind(&mut session, &snap, TeamSide::Home), ActionKind::Shoot);

        session.begin(&snap, TeamSide::Home, PressTarget::Point(Position::new(98.0, 40.0)));
        assert_eq!(released_kind(&mut session, &snap, TeamSide::Home), ActionKind::Dribble);
    }

    #[test]
    fn test_away_shoots_towards_its_own_attacking_goal() {
        let mut snap = live_snapshot(
            vec![player_at(20, 20.0, 40.0), player_at(19, 30.0, 30.0)],
            Position::new(20.0, 40.0),
        );
        give_ball(&mut snap, PlayerId(20));
        let mut session = InputSession::new();

        // AWAY attacks x=0.
        session.begin(&snap, TeamSide::Away, PressTarget::Point(Position::new(1.0, 40.0)));
        let req = session.release(&snap, TeamSide::Away, &pitch()).unwrap();
        assert_eq!(req.kind, ActionKind::Shoot);
        assert_eq!(req.target, Position::new(1.0, 40.0));

        session.begin(&snap, TeamSide::Away, PressTarget::Point(Position::new(22.0, 40.0)));
        assert_eq!(released_kind(&mut session, &snap, TeamSide::Away), ActionKind::Dribble);

        // Near the HOME side's attacking goal is a run, not a shot.
        session.begin(&snap, TeamSide::Away, PressTarget::Point(Position::new(110.0, 40.0)));
        assert_eq!(released_kind(&mut session, &snap, TeamSide::Away), ActionKind::Dribble);
    }

    #[test]
    fn test_press_on_self_or_opponent_is_not_a_pass() {
        let snap = home_holding();
        let mut session = InputSession::new();

        session.begin(&snap, TeamSide::Home, press_on(&snap, PlayerId(9)));
        assert_eq!(released_kind(&mut session, &snap, TeamSide::Home), ActionKind::Dribble);

        session.begin(&snap, TeamSide::Home, press_on(&snap, PlayerId(14)));
        assert_eq!(released_kind(&mut session, &snap, TeamSide::Home), ActionKind::Dribble);
    }

    #[test]
    fn test_cannot_arm_without_possession() {
        let mut snap = home_holding();
        give_ball(&mut snap, PlayerId(14));
        let mut session = InputSession::new();
        assert!(!session.begin(&snap, TeamSide::Home, PressTarget::Point(Position::new(50.0, 40.0))));
        session.charge_tick();
        assert_eq!(session.power(), 0.0);
        assert!(session.release(&snap, TeamSide::Home, &pitch()).is_none());
    }

    #[test]
    fn test_release_after_turnover_is_cleared() {
        let mut snap = home_holding();
        let mut session = InputSession::new();
        session.begin(&snap, TeamSide::Home, PressTarget::Point(Position::new(100.0, 40.0)));
        snap.ball.owner = None;
        assert!(session.release(&snap, TeamSide::Home, &pitch()).is_none());
        assert!(!session.is_armed());
    }
}
