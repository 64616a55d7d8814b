use rand::Rng;
use serde::{Deserialize, Serialize};

use super::match_setup::TeamSide;
use crate::engine::types::Position;

/// Stable player identity: track index 0..=10 (home) and 11..=21 (away).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[inline]
    pub fn track_id(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn side(self) -> TeamSide {
        TeamSide::from_track_id(self.track_id())
    }

    /// Slot index within the side (0..=10).
    #[inline]
    pub fn slot(self) -> usize {
        self.track_id() - self.side().track_offset()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.side() {
            TeamSide::Home => "home",
            TeamSide::Away => "away",
        };
        write!(f, "{}_{}", prefix, self.slot())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerRole {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MID")]
    Midfielder,
    #[serde(rename = "FWD")]
    Forward,
}

impl PlayerRole {
    /// Goalkeepers and defenders share the back-line decision branch.
    #[inline]
    pub fn is_back_line(self) -> bool {
        matches!(self, PlayerRole::Goalkeeper | PlayerRole::Defender)
    }
}

/// Fixed skill scalars, roughly in [70, 95].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub speed: f32,
    pub passing: f32,
    pub shooting: f32,
    pub dribbling: f32,
    pub defense: f32,
}

impl Stats {
    pub const FLOOR: f32 = 70.0;
    pub const SPEED_SPREAD: f32 = 20.0;
    pub const SKILL_SPREAD: f32 = 25.0;

    /// Draw a fresh stat line: speed in 70..90, everything else in 70..95.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            speed: Self::FLOOR + rng.gen::<f32>() * Self::SPEED_SPREAD,
            passing: Self::FLOOR + rng.gen::<f32>() * Self::SKILL_SPREAD,
            shooting: Self::FLOOR + rng.gen::<f32>() * Self::SKILL_SPREAD,
            dribbling: Self::FLOOR + rng.gen::<f32>() * Self::SKILL_SPREAD,
            defense: Self::FLOOR + rng.gen::<f32>() * Self::SKILL_SPREAD,
        }
    }

    pub const fn uniform(value: f32) -> Self {
        Self { speed: value, passing: value, shooting: value, dribbling: value, defense: value }
    }
}

/// A simulated agent on the pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Formation slot label (GK, LB, CM1, ...).
    pub name: String,
    pub side: TeamSide,
    pub role: PlayerRole,
    pub position: Position,
    /// Home formation slot; base for off-ball targets.
    pub anchor: Position,
    /// 0..=100
    pub stamina: f32,
    pub stats: Stats,
    pub has_ball: bool,
    /// Ticks before the player may act (or pick up a loose ball) again.
    pub action_cooldown: u32,
    /// Reserved for goalkeeper dashes.
    pub dash_cooldown: u32,
}

impl Player {
    pub const MAX_STAMINA: f32 = 100.0;

    #[inline]
    pub fn distance_to(&self, point: &Position) -> f32 {
        self.position.distance_to(point)
    }

    #[inline]
    pub fn can_act(&self) -> bool {
        self.action_cooldown == 0
    }

    /// `0.5` when exhausted, `1.0` when fresh.
    #[inline]
    pub fn stamina_factor(&self) -> f32 {
        0.5 + (self.stamina / Self::MAX_STAMINA) * 0.5
    }
}
