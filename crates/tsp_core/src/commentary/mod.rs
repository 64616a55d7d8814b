//! Commentary
//!
//! Narration boundary of the engine: match events in, display lines out.
//!
//! - `lines`: static lines per category
//! - `narrator`: throttling, priority override, remote generator with breaker
//! - `desk`: worker thread publishing the latest line

pub mod desk;
pub mod lines;
pub mod narrator;

pub use desk::CommentaryDesk;
pub use lines::{NarrationCategory, WELCOME_LINE};
pub use narrator::{GeneratorError, LineSource, NarrationLine, Narrator, TextGenerator};
