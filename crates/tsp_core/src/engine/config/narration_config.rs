//! Commentary throttling

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    /// Minimum gap between non-priority narration requests (default: 12000)
    pub min_interval_ms: u64,
    /// Remote generator stays silenced this long after a quota error (default: 60000)
    pub breaker_ms: u64,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self { min_interval_ms: 12_000, breaker_ms: 60_000 }
    }
}
