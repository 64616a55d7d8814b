pub mod ball;
pub mod config; // Tuning configuration (pitch, ball, movement, actions, timing, narration)
pub mod debug_flags; // Debug output gating (env-based)
pub mod live_match; // Real-time runner thread with snapshot handoff
pub mod match_sim;
pub mod probability;
pub mod snapshot; // Immutable per-tick match state
pub mod sort_keys; // Stable tie-breaker keys
pub mod steering;
pub mod timestep; // Reference cadence constants
pub mod types;

pub use ball::Ball;
pub use config::EngineConfig;
pub use live_match::{LiveMatch, MatchCommand};
pub use match_sim::{
    ActionRequest, InputSession, MatchEngine, MatchPhase, PressTarget, StepResult, TickData,
};
pub use snapshot::{MatchSnapshot, Score};
pub use types::Position;
