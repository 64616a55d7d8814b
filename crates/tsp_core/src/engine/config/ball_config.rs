//! Ball physics parameters

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    /// Velocity multiplier applied every tick (default: 0.97)
    pub drag: f32,
    /// Share of the normal velocity kept after a boundary bounce (default: 0.5)
    pub restitution: f32,
    /// Loose-ball pickup distance (default: 2.5)
    pub pickup_radius: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self { drag: 0.97, restitution: 0.5, pickup_radius: 2.5 }
    }
}

impl BallConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if !(self.drag > 0.0 && self.drag <= 1.0) {
            return Err(format!("ball drag must be in (0, 1], got {}", self.drag));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(format!("restitution must be in [0, 1], got {}", self.restitution));
        }
        if self.pickup_radius <= 0.0 {
            return Err(format!("pickup radius must be positive, got {}", self.pickup_radius));
        }
        Ok(())
    }
}
