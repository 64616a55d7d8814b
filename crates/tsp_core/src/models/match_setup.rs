use serde::{Deserialize, Serialize};

use crate::tactics::{FormationTemplate, TeamStrategy};

/// Squad affiliation. HOME defends x=0 and attacks x=pitch width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TeamSide {
    #[default]
    Home,
    Away,
}

impl TeamSide {
    /// Players per side.
    pub const SQUAD_SIZE: usize = 11;

    /// Side owning a track id (0-10: Home, 11-21: Away)
    #[inline]
    pub const fn from_track_id(track_id: usize) -> Self {
        if track_id < Self::SQUAD_SIZE {
            TeamSide::Home
        } else {
            TeamSide::Away
        }
    }

    /// First track id of this side's block.
    #[inline]
    pub const fn track_offset(self) -> usize {
        match self {
            TeamSide::Home => 0,
            TeamSide::Away => Self::SQUAD_SIZE,
        }
    }

    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    /// +1 when attacking toward increasing x, -1 otherwise.
    #[inline]
    pub const fn forward_dir(self) -> f32 {
        match self {
            TeamSide::Home => 1.0,
            TeamSide::Away => -1.0,
        }
    }

    /// x of the goal line this side attacks.
    #[inline]
    pub fn attacking_goal_x(self, pitch_width: f32) -> f32 {
        match self {
            TeamSide::Home => pitch_width,
            TeamSide::Away => 0.0,
        }
    }

    /// x of the goal line this side defends.
    #[inline]
    pub fn own_goal_x(self, pitch_width: f32) -> f32 {
        self.opponent().attacking_goal_x(pitch_width)
    }

    pub const fn label(self) -> &'static str {
        match self {
            TeamSide::Home => "HOME",
            TeamSide::Away => "AWAY",
        }
    }
}

impl std::fmt::Display for TeamSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-match setup: who is human-controlled, seeding and squad shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSetup {
    /// Seed for the engine RNG (stats, aim deviation, drift direction).
    pub seed: u64,
    /// Side driven by the input boundary. `None` lets both sides play autonomously.
    pub human_side: Option<TeamSide>,
    pub home_strategy: TeamStrategy,
    pub home_formation: FormationTemplate,
    pub away_formation: FormationTemplate,
}

impl Default for MatchSetup {
    fn default() -> Self {
        Self {
            seed: 0,
            human_side: Some(TeamSide::Home),
            home_strategy: TeamStrategy::default(),
            home_formation: FormationTemplate::home_442(),
            away_formation: FormationTemplate::away_442(),
        }
    }
}

impl MatchSetup {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    /// Both sides decided by the decision engine.
    pub fn autoplay(seed: u64) -> Self {
        Self { seed, human_side: None, ..Self::default() }
    }

    /// Whether `side` is driven by the decision engine.
    #[inline]
    pub fn is_autonomous(&self, side: TeamSide) -> bool {
        self.human_side != Some(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_id_split() {
        assert_eq!(TeamSide::from_track_id(0), TeamSide::Home);
        assert_eq!(TeamSide::from_track_id(10), TeamSide::Home);
        assert_eq!(TeamSide::from_track_id(11), TeamSide::Away);
        assert_eq!(TeamSide::from_track_id(21), TeamSide::Away);
    }

    #[test]
    fn test_goal_lines() {
        assert_eq!(TeamSide::Home.attacking_goal_x(120.0), 120.0);
        assert_eq!(TeamSide::Home.own_goal_x(120.0), 0.0);
        assert_eq!(TeamSide::Away.attacking_goal_x(120.0), 0.0);
        assert_eq!(TeamSide::Away.forward_dir(), -1.0);
    }

    #[test]
    fn test_autonomy() {
        let setup = MatchSetup::default();
        assert!(!setup.is_autonomous(TeamSide::Home));
        assert!(setup.is_autonomous(TeamSide::Away));

        let auto = MatchSetup::autoplay(7);
        assert!(auto.is_autonomous(TeamSide::Home));
        assert!(auto.is_autonomous(TeamSide::Away));
    }

    #[test]
    fn test_side_serializes_uppercase() {
        let json = serde_json::to_string(&TeamSide::Away).unwrap();
        assert_eq!(json, "\"AWAY\"");
    }
}
