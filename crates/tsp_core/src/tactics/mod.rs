// Tactical setup: formation templates and team strategy

pub mod formation;
pub mod strategy;

pub use formation::{build_roster, FormationSlot, FormationTemplate};
pub use strategy::TeamStrategy;
