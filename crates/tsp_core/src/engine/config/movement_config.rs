//! Off-ball movement and stamina drain

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // === Speed ===
    /// Chaser step = speed/100 * this (default: 1.2)
    pub chaser_speed_factor: f32,
    /// Everyone else (default: 0.9)
    pub base_speed_factor: f32,

    // === Stamina ===
    /// Per tick while chasing (default: 0.05)
    pub chaser_stamina_drain: f32,
    /// Per tick otherwise (default: 0.01)
    pub base_stamina_drain: f32,
    /// Movement never drains below this (default: 10)
    pub stamina_floor: f32,

    // === Goalkeeper ===
    /// Ball this close to the keeper's goal line triggers the save stance (default: 30)
    pub keeper_alert_distance: f32,
    /// Save stance depth in front of the line (default: 6)
    pub keeper_step_out: f32,
    /// Share of ball-y in the save stance y (default: 0.3)
    pub keeper_ball_bias: f32,

    // === Marking ===
    /// Weight of the nearest threat vs. the defended goal centre (default: 0.7)
    pub marking_threat_weight: f32,

    // === Support runs ===
    /// Push toward the attacking direction (default: 15)
    pub support_push: f32,
    /// Share of the ball's horizontal deviation from centre (default: 0.5)
    pub support_ball_x_share: f32,
    /// Share of the ball's vertical deviation from centre (default: 0.3)
    pub support_ball_y_share: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            chaser_speed_factor: 1.2,
            base_speed_factor: 0.9,

            chaser_stamina_drain: 0.05,
            base_stamina_drain: 0.01,
            stamina_floor: 10.0,

            keeper_alert_distance: 30.0,
            keeper_step_out: 6.0,
            keeper_ball_bias: 0.3,

            marking_threat_weight: 0.7,

            support_push: 15.0,
            support_ball_x_share: 0.5,
            support_ball_y_share: 0.3,
        }
    }
}
