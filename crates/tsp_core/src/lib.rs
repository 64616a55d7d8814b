//! # tsp_core - Real-time Tactical Soccer Match Engine
//!
//! Fixed-tick simulation of an 11-a-side match on a 120x80 pitch. One side
//! can be driven by a human through action requests, the other (or both) by
//! the built-in decision engine.
//!
//! ## Features
//! - Deterministic per seed (same seed and inputs = same match)
//! - Stat-driven success probabilities for pass, shoot, dribble
//! - Immutable per-tick snapshots for lock-free reading
//! - Background runner and commentary desk for live play

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Physics and scoring helpers take the whole pitch context
#![allow(clippy::too_many_arguments)]

pub mod commentary;
pub mod engine;
pub mod error;
pub mod models;
pub mod tactics;

pub use error::{MatchError, Result};

// Re-export engine entry points
pub use engine::{
    ActionRequest, EngineConfig, InputSession, LiveMatch, MatchCommand, MatchEngine, MatchPhase,
    MatchSnapshot, Position, PressTarget, Score, StepResult, TickData,
};

// Re-export match models
pub use models::{
    ActionKind, EventType, MatchEvent, MatchSetup, Player, PlayerId, PlayerRole, Stats, TeamSide,
};

// Re-export tactics system
pub use tactics::{FormationSlot, FormationTemplate, TeamStrategy};

// Re-export commentary
pub use commentary::{CommentaryDesk, NarrationLine, Narrator, TextGenerator};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
