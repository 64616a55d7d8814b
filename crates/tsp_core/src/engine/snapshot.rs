//! Match Snapshot
//!
//! The immutable per-tick state handed to readers. The engine derives a new
//! snapshot from the previous one every tick and swaps it in whole, so a
//! reader never observes a half-applied update.

use serde::{Deserialize, Serialize};

use crate::engine::ball::Ball;
use crate::engine::match_sim::match_phase::MatchPhase;
use crate::models::{Player, PlayerId, TeamSide};
use crate::tactics::TeamStrategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    #[inline]
    pub fn for_side(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }

    pub fn add_goal(&mut self, side: TeamSide) {
        match side {
            TeamSide::Home => self.home += 1,
            TeamSide::Away => self.away += 1,
        }
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.home + self.away
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub score: Score,
    pub phase: MatchPhase,
    pub ball: Ball,
    /// All 22 agents in id order (empty before the first kickoff).
    pub players: Vec<Player>,
    /// Match clock in seconds.
    pub elapsed: f32,
    pub tick: u64,
    pub last_action_summary: String,
    pub is_global_pressing: bool,
    pub home_strategy: TeamStrategy,
    /// Side that conceded most recently; it takes the next kickoff.
    pub last_conceded: Option<TeamSide>,
}

impl MatchSnapshot {
    /// State before the start command: no roster, ball resting on the centre spot.
    pub fn pre_match(home_strategy: TeamStrategy) -> Self {
        Self {
            score: Score::default(),
            phase: MatchPhase::PreMatch,
            ball: Ball::default(),
            players: Vec::new(),
            elapsed: 0.0,
            tick: 0,
            last_action_summary: String::new(),
            is_global_pressing: false,
            home_strategy,
            last_conceded: None,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        match self.players.get(id.track_id()) {
            Some(p) if p.id == id => Some(p),
            _ => self.players.iter().find(|p| p.id == id),
        }
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        let idx = match self.players.get(id.track_id()) {
            Some(p) if p.id == id => id.track_id(),
            _ => self.players.iter().position(|p| p.id == id)?,
        };
        self.players.get_mut(idx)
    }

    /// Current ball holder, if any.
    pub fn holder(&self) -> Option<&Player> {
        self.ball.owner.and_then(|id| self.player(id))
    }

    pub fn possessing_side(&self) -> Option<TeamSide> {
        self.holder().map(|p| p.side)
    }

    /// Side celebrating a goal while the restart is pending.
    pub fn celebrating_side(&self) -> Option<TeamSide> {
        match self.phase {
            MatchPhase::GoalCelebration => self.last_conceded.map(TeamSide::opponent),
            _ => None,
        }
    }

    pub fn team(&self, side: TeamSide) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.side == side)
    }

    /// Number of agents flagged as holding the ball.
    pub fn possession_count(&self) -> usize {
        self.players.iter().filter(|p| p.has_ball).count()
    }

    /// Match clock as `MM:SS`.
    pub fn clock_label(&self) -> String {
        let total = self.elapsed.max(0.0) as u64;
        format!("{:02}:{:02}", total / 60, total % 60)
    }
}
