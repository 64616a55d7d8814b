use serde::{Deserialize, Serialize};

use super::match_setup::TeamSide;
use super::player::PlayerId;

/// On-ball actions a holder can attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Pass,
    Shoot,
    Dribble,
}

impl ActionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::Pass => "pass",
            ActionKind::Shoot => "shoot",
            ActionKind::Dribble => "dribble",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEvent {
    /// Engine tick at which the event happened.
    pub tick: u64,
    /// Match clock in seconds.
    pub elapsed: f32,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub side: TeamSide,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<EventDetails>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Match start / restart after goal
    KickOff,
    Goal,
    Pass,
    Shot,
    Dribble,
    /// Pressured back-line pass away from goal
    Clearance,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EventDetails {
    /// Formation label of the actor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<f32>,
}

impl MatchEvent {
    pub fn kickoff(tick: u64, elapsed: f32, side: TeamSide) -> Self {
        Self { tick, elapsed, event_type: EventType::KickOff, side, player_id: None, details: None }
    }

    pub fn goal(tick: u64, elapsed: f32, side: TeamSide) -> Self {
        Self { tick, elapsed, event_type: EventType::Goal, side, player_id: None, details: None }
    }

    /// Goals and kickoffs always get fresh narration.
    #[inline]
    pub fn is_priority(&self) -> bool {
        matches!(self.event_type, EventType::Goal | EventType::KickOff)
    }

    /// Human-readable one-liner, also used as the snapshot's last-action summary.
    pub fn description(&self) -> String {
        match self.event_type {
            EventType::KickOff => format!("Kickoff: {}", self.side),
            EventType::Goal => format!("GOAL for {}!", self.side),
            EventType::Pass | EventType::Shot | EventType::Dribble | EventType::Clearance => {
                let name = self
                    .details
                    .as_ref()
                    .and_then(|d| d.actor_name.as_deref())
                    .unwrap_or("Player");
                let verb = match self.event_type {
                    EventType::Pass => "pass",
                    EventType::Shot => "shoot",
                    EventType::Dribble => "dribble",
                    _ => "clearance",
                };
                format!("{} {}", name, verb)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(event_type: EventType) -> MatchEvent {
        MatchEvent {
            tick: 12,
            elapsed: 0.48,
            event_type,
            side: TeamSide::Away,
            player_id: Some(PlayerId(20)),
            details: Some(EventDetails {
                actor_name: Some("FW2".to_string()),
                success: Some(true),
                probability: Some(61.0),
                power: Some(88.0),
            }),
        }
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(MatchEvent::kickoff(0, 0.0, TeamSide::Away).description(), "Kickoff: AWAY");
        assert_eq!(MatchEvent::goal(9, 1.0, TeamSide::Home).description(), "GOAL for HOME!");
        assert_eq!(action(EventType::Shot).description(), "FW2 shoot");
        assert_eq!(action(EventType::Clearance).description(), "FW2 clearance");
    }

    #[test]
    fn test_priority() {
        assert!(MatchEvent::goal(0, 0.0, TeamSide::Home).is_priority());
        assert!(MatchEvent::kickoff(0, 0.0, TeamSide::Home).is_priority());
        assert!(!action(EventType::Pass).is_priority());
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_value(action(EventType::Dribble)).unwrap();
        assert_eq!(json["type"], "dribble");
        assert_eq!(json["side"], "AWAY");
        assert_eq!(json["player_id"], 20);
    }
}
