use thiserror::Error;

use crate::engine::match_sim::match_phase::{MatchPhase, PhaseTrigger};

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid formation: {0}")]
    InvalidFormation(String),

    #[error("Invalid phase transition: {trigger:?} is not allowed during {from:?}")]
    InvalidTransition { from: MatchPhase, trigger: PhaseTrigger },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MatchError {
    /// Whether the match can keep running after this error.
    ///
    /// A malformed formation aborts kickoff; a rejected phase trigger leaves the
    /// current phase untouched.
    pub fn is_recoverable(&self) -> bool {
        match self {
            MatchError::InvalidTransition { .. } => true,
            MatchError::InvalidFormation(_) => false,
            MatchError::Config(_) => false,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
