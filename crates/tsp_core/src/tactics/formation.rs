//! Formation templates
//!
//! Each slot carries its role explicitly; roles are never inferred from the
//! slot label. The whole 22-player roster is rebuilt from these templates at
//! every kickoff.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::config::PitchConfig;
use crate::engine::types::Position;
use crate::error::{MatchError, Result};
use crate::models::{Player, PlayerId, PlayerRole, Stats, TeamSide};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationSlot {
    pub label: String,
    pub role: PlayerRole,
    pub anchor: Position,
}

impl FormationSlot {
    pub fn new(label: &str, role: PlayerRole, x: f32, y: f32) -> Self {
        Self { label: label.to_string(), role, anchor: Position::new(x, y) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationTemplate {
    pub name: String,
    pub slots: Vec<FormationSlot>,
}

impl FormationTemplate {
    /// 4-4-2 for the side defending x=0.
    pub fn home_442() -> Self {
        use PlayerRole::*;
        Self {
            name: "4-4-2".to_string(),
            slots: vec![
                FormationSlot::new("GK", Goalkeeper, 5.0, 40.0),
                FormationSlot::new("LB", Defender, 25.0, 15.0),
                FormationSlot::new("CB1", Defender, 22.0, 32.0),
                FormationSlot::new("CB2", Defender, 22.0, 48.0),
                FormationSlot::new("RB", Defender, 25.0, 65.0),
                FormationSlot::new("LM", Midfielder, 52.0, 15.0),
                FormationSlot::new("CM1", Midfielder, 48.0, 32.0),
                FormationSlot::new("CM2", Midfielder, 48.0, 48.0),
                FormationSlot::new("RM", Midfielder, 52.0, 65.0),
                FormationSlot::new("FW1", Forward, 58.0, 35.0),
                FormationSlot::new("FW2", Forward, 58.0, 45.0),
            ],
        }
    }

    /// 4-4-2 for the side defending x=120 (left/right mirrored).
    pub fn away_442() -> Self {
        use PlayerRole::*;
        Self {
            name: "4-4-2".to_string(),
            slots: vec![
                FormationSlot::new("GK", Goalkeeper, 115.0, 40.0),
                FormationSlot::new("LB", Defender, 95.0, 65.0),
                FormationSlot::new("CB1", Defender, 98.0, 48.0),
                FormationSlot::new("CB2", Defender, 98.0, 32.0),
                FormationSlot::new("RB", Defender, 95.0, 15.0),
                FormationSlot::new("LM", Midfielder, 68.0, 65.0),
                FormationSlot::new("CM1", Midfielder, 72.0, 48.0),
                FormationSlot::new("CM2", Midfielder, 72.0, 32.0),
                FormationSlot::new("RM", Midfielder, 68.0, 15.0),
                FormationSlot::new("FW1", Forward, 62.0, 45.0),
                FormationSlot::new("FW2", Forward, 62.0, 35.0),
            ],
        }
    }

    pub fn default_for(side: TeamSide) -> Self {
        match side {
            TeamSide::Home => Self::home_442(),
            TeamSide::Away => Self::away_442(),
        }
    }

    /// Slot index of the designated kickoff taker (first forward).
    pub fn kicking_slot(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.role == PlayerRole::Forward)
    }

    /// Reject templates that cannot produce a full, playable squad.
    pub fn validate(&self, pitch: &PitchConfig) -> Result<()> {
        if self.slots.len() != TeamSide::SQUAD_SIZE {
            return Err(MatchError::InvalidFormation(format!(
                "{}: expected {} slots, found {}",
                self.name,
                TeamSide::SQUAD_SIZE,
                self.slots.len()
            )));
        }

        let keepers = self.slots.iter().filter(|s| s.role == PlayerRole::Goalkeeper).count();
        if keepers != 1 {
            return Err(MatchError::InvalidFormation(format!(
                "{}: expected exactly one goalkeeper, found {}",
                self.name, keepers
            )));
        }

        if self.kicking_slot().is_none() {
            return Err(MatchError::InvalidFormation(format!(
                "{}: no forward available to take kickoffs",
                self.name
            )));
        }

        let mut labels = HashSet::new();
        for slot in &self.slots {
            if !labels.insert(slot.label.as_str()) {
                return Err(MatchError::InvalidFormation(format!(
                    "{}: duplicate slot label {}",
                    self.name, slot.label
                )));
            }
            let a = slot.anchor;
            let inside = (0.0..=pitch.width).contains(&a.x) && (0.0..=pitch.height).contains(&a.y);
            if !inside || !a.x.is_finite() || !a.y.is_finite() {
                return Err(MatchError::InvalidFormation(format!(
                    "{}: slot {} anchored outside the pitch at ({}, {})",
                    self.name, slot.label, a.x, a.y
                )));
            }
        }

        Ok(())
    }
}

/// Build all 22 players at their anchors with fresh stats.
///
/// Both templates are validated first; nothing is built from a partial roster.
pub fn build_roster<R: Rng + ?Sized>(
    home: &FormationTemplate,
    away: &FormationTemplate,
    pitch: &PitchConfig,
    rng: &mut R,
) -> Result<Vec<Player>> {
    home.validate(pitch)?;
    away.validate(pitch)?;

    let mut players = Vec::with_capacity(TeamSide::SQUAD_SIZE * 2);
    for (side, template) in [(TeamSide::Home, home), (TeamSide::Away, away)] {
        for (idx, slot) in template.slots.iter().enumerate() {
            let anchor = slot.anchor.clamped(
                pitch.player_margin,
                pitch.width - pitch.player_margin,
                pitch.player_margin,
                pitch.height - pitch.player_margin,
            );
            players.push(Player {
                id: PlayerId((side.track_offset() + idx) as u8),
                name: slot.label.clone(),
                side,
                role: slot.role,
                position: anchor,
                anchor: slot.anchor,
                stamina: Player::MAX_STAMINA,
                stats: Stats::random(rng),
                has_ball: false,
                action_cooldown: 0,
                dash_cooldown: 0,
            });
        }
    }
    Ok(players)
}
