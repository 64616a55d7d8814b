/// timestep.rs
/// Reference cadence constants
///
/// One fixed tick advances movement, ball physics and possession together.
/// A goal pauses play for a real-time celebration before the restart.

/// Tick period (40ms) - simulation update rate
pub const TICK_MS: u64 = 40;

/// Goal celebration before the restart kickoff (4s)
pub const CELEBRATION_MS: u64 = 4_000;

/// Ticks in one celebration at the reference cadence
pub const CELEBRATION_TICKS: u64 = CELEBRATION_MS / TICK_MS;

// Compile-time validation
const _: () = assert!(CELEBRATION_MS % TICK_MS == 0);
