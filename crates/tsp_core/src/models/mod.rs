pub mod events;
pub mod match_setup;
pub mod player;

pub use events::{ActionKind, EventDetails, EventType, MatchEvent};
pub use match_setup::{MatchSetup, TeamSide};
pub use player::{Player, PlayerId, PlayerRole, Stats};
