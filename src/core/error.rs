use thiserror::Error;

use crate::actions::catalog::{ActionKind, UnitKind};
use crate::core::types::CombatantId;

/// Validation failures for a submitted action.
///
/// All of these are detected before any random draw; a call that returns one
/// has not touched the war or either combatant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("War is not active")]
    WarNotActive,

    #[error("Combatant {0} is not part of this war")]
    UnknownCombatant(CombatantId),

    #[error("Combatant {0} is eliminated or spectating")]
    CombatantNotEligible(CombatantId),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Action commits no units")]
    NothingCommitted,

    #[error("Insufficient {unit:?}: committed {committed}, available {available}")]
    InsufficientUnits {
        unit: UnitKind,
        committed: u64,
        available: u64,
    },

    #[error("Insufficient action points for {kind:?}: need {required}, have {available}")]
    InsufficientActionPoints {
        kind: ActionKind,
        required: u32,
        available: u32,
    },
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Cannot join war: {0}")]
    Join(String),

    #[error("War task is no longer running")]
    WarClosed,

    #[error(transparent)]
    Action(#[from] ActionError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
