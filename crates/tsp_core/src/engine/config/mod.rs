//! # Engine Configuration Module
//!
//! Central home for every tuning constant of the engine.
//!
//! Pitch geometry, ball physics, movement, action resolution, tick cadence and
//! narration throttling all live here instead of inline magic numbers. Every
//! field has a serde default, so a config file only needs the values it
//! overrides.
//!
//! ## Usage
//! ```rust
//! use tsp_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let tuned = EngineConfig::from_yaml_str("ball:\n  drag: 0.95\n").unwrap();
//! assert_eq!(tuned.pitch.width, config.pitch.width);
//! ```
//!
//! ## Environment Variables
//!
//! - `TSP_ENGINE_CONFIG`: path to a YAML or JSON config file

mod action_config;
mod ball_config;
mod movement_config;
mod narration_config;
mod pitch_config;
mod timing_config;

pub use action_config::ActionConfig;
pub use ball_config::BallConfig;
pub use movement_config::MovementConfig;
pub use narration_config::NarrationConfig;
pub use pitch_config::PitchConfig;
pub use timing_config::TimingConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

pub const CONFIG_ENV_VAR: &str = "TSP_ENGINE_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub pitch: PitchConfig,
    pub ball: BallConfig,
    pub movement: MovementConfig,
    pub actions: ActionConfig,
    pub timing: TimingConfig,
    pub narration: NarrationConfig,
}

impl EngineConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a file; `.json` is parsed as JSON, anything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json =
            path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    /// `TSP_ENGINE_CONFIG` if set and loadable, defaults otherwise.
    pub fn from_env_or_default() -> Self {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => match Self::from_path(&path) {
                Ok(cfg) => cfg,
                Err(err) => {
                    log::warn!("Ignoring {}={}: {}", CONFIG_ENV_VAR, path, err);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.pitch.validate().map_err(MatchError::Config)?;
        self.ball.validate().map_err(MatchError::Config)?;
        if self.timing.tick_ms == 0 {
            return Err(MatchError::Config("tick period must be at least 1 ms".to_string()));
        }
        if self.actions.stamina_cost_divisor <= 0.0 {
            return Err(MatchError::Config(format!(
                "stamina cost divisor must be positive, got {}",
                self.actions.stamina_cost_divisor
            )));
        }
        Ok(())
    }
}

// ========== Tests ==========
