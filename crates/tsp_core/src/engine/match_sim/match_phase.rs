//! Match phase flow: pre-match, live play and goal celebration.
//!
//! There is no terminal phase; a match runs until the owner stops it.

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchPhase {
    /// Waiting for the start command.
    #[default]
    PreMatch,
    Live,
    /// Simulation paused until the restart kickoff fires.
    GoalCelebration,
}

impl MatchPhase {
    /// Only live play advances movement, physics and decisions.
    #[inline]
    pub fn is_live(self) -> bool {
        self == MatchPhase::Live
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseTrigger {
    /// External `start_match` call.
    StartCommand,
    GoalScored,
    /// The deferred restart kickoff fired.
    CelebrationElapsed,
}

/// Phase after `trigger` fires in `current`, or `None` when the trigger has
/// no meaning there.
pub fn next_phase(current: MatchPhase, trigger: PhaseTrigger) -> Option<MatchPhase> {
    match (current, trigger) {
        (MatchPhase::PreMatch, PhaseTrigger::StartCommand) => Some(MatchPhase::Live),
        (MatchPhase::Live, PhaseTrigger::GoalScored) => Some(MatchPhase::GoalCelebration),
        (MatchPhase::GoalCelebration, PhaseTrigger::CelebrationElapsed) => Some(MatchPhase::Live),
        _ => None,
    }
}

/// Like [`next_phase`], rejecting meaningless triggers with an error.
pub fn transition(current: MatchPhase, trigger: PhaseTrigger) -> Result<MatchPhase> {
    next_phase(current, trigger).ok_or(MatchError::InvalidTransition { from: current, trigger })
}
