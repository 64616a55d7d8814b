use serde::{Deserialize, Serialize};

/// Home side's declared approach. Carried in the snapshot as tactical context.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TeamStrategy {
    Defensive,
    #[default]
    Balanced,
    Attacking,
}

impl TeamStrategy {
    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::Defensive => "Defensive",
            Self::Balanced => "Balanced",
            Self::Attacking => "Attacking",
        }
    }
}
