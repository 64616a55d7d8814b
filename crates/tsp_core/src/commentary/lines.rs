//! Pre-authored commentary lines, grouped by category.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{EventType, MatchEvent};

/// Shown before the first narration arrives.
pub const WELCOME_LINE: &str = "Welcome to Tactical Soccer Pro!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrationCategory {
    Goal,
    Attack,
    Defense,
    Midfield,
    Default,
}

const GOAL_LINES: &[&str] = &[
    "GOAL! The stands erupt!",
    "Buried in the top corner, the keeper had no chance!",
    "Clinical finish, the net is still shaking!",
    "Pure celebration, the scoreboard moves again!",
];

const ATTACK_LINES: &[&str] = &[
    "Electric running, you can smell danger!",
    "Straight for goal, they want to break the lines now!",
    "Taking players on, the crowd is roaring!",
    "What a piece of skill, defenders left behind!",
];

const DEFENSE_LINES: &[&str] = &[
    "Saving challenge, perfect timing!",
    "Rock solid at the back, nothing gets through!",
    "Cleared just in time, fire put out!",
    "Compact block, tactical discipline at the back!",
];

const MIDFIELD_LINES: &[&str] = &[
    "A battle in the engine room, nobody gives an inch!",
    "The move is being built from the middle!",
    "Calm on the ball, patient circulation!",
    "Lovely switch of play, the pitch opens up!",
];

const DEFAULT_LINES: &[&str] = &[
    "The pace is frantic, no let-up here!",
    "The crowd pushes them on!",
    "Every pass counts in a match of fine margins!",
    "Maximum intensity on every blade of grass!",
];

impl NarrationCategory {
    pub fn for_event(event: &MatchEvent) -> Self {
        match event.event_type {
            EventType::Goal => NarrationCategory::Goal,
            EventType::Shot | EventType::Dribble | EventType::Pass => NarrationCategory::Attack,
            EventType::Clearance => NarrationCategory::Defense,
            EventType::KickOff => NarrationCategory::Midfield,
        }
    }

    pub fn lines(self) -> &'static [&'static str] {
        match self {
            NarrationCategory::Goal => GOAL_LINES,
            NarrationCategory::Attack => ATTACK_LINES,
            NarrationCategory::Defense => DEFENSE_LINES,
            NarrationCategory::Midfield => MIDFIELD_LINES,
            NarrationCategory::Default => DEFAULT_LINES,
        }
    }

    /// Random line from this category.
    pub fn pick<R: Rng + ?Sized>(self, rng: &mut R) -> &'static str {
        let lines = self.lines();
        lines[rng.gen_range(0..lines.len())]
    }
}
