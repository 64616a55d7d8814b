//! Tick cadence and deferred restarts

use serde::{Deserialize, Serialize};

use crate::engine::timestep;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Fixed tick period in milliseconds (default: 40)
    pub tick_ms: u64,
    /// Goal celebration before the restart kickoff (default: 4000)
    pub celebration_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { tick_ms: timestep::TICK_MS, celebration_ms: timestep::CELEBRATION_MS }
    }
}

impl TimingConfig {
    /// Seconds of match clock per tick.
    #[inline]
    pub fn tick_seconds(&self) -> f32 {
        self.tick_ms as f32 / 1000.0
    }

    /// Celebration length in whole ticks (at least one).
    #[inline]
    pub fn celebration_ticks(&self) -> u64 {
        self.celebration_ms.div_ceil(self.tick_ms.max(1)).max(1)
    }
}
