//! Action resolution parameters

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    /// Flat bonus added to the model probability before the roll (default: 5)
    pub success_bias: f32,
    /// Force scale for shots (default: 17)
    pub shoot_force: f32,
    /// Force scale for passes and dribbles (default: 12)
    pub pass_force: f32,
    /// Constant added to every kick (default: 2.8)
    pub base_force: f32,
    /// Share of force kept on a miss (default: 0.8)
    pub miss_force_factor: f32,
    /// Aim spread in radians per missing probability point (default: 0.003)
    pub miss_deviation_per_point: f32,
    /// Stamina cost = power / this (default: 14)
    pub stamina_cost_divisor: f32,
    /// Ticks before the actor may act again (default: 25)
    pub cooldown_ticks: u32,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            success_bias: 5.0,
            shoot_force: 17.0,
            pass_force: 12.0,
            base_force: 2.8,
            miss_force_factor: 0.8,
            miss_deviation_per_point: 0.003,
            stamina_cost_divisor: 14.0,
            cooldown_ticks: 25,
        }
    }
}
