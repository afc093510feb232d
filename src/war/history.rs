//! Append-only battle log

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::actions::catalog::Action;
use crate::combat::outcome::BattleOutcome;
use crate::core::types::{CombatantId, Timestamp, Turn, WarId};

/// What a participant asks the war to do
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub actor: CombatantId,
    #[serde(default)]
    pub target: Option<CombatantId>,
    pub action: Action,
}

impl ActionRequest {
    pub fn new(actor: CombatantId, target: Option<CombatantId>, action: Action) -> Self {
        Self { actor, target, action }
    }

    /// Request aimed at another combatant
    pub fn against(actor: CombatantId, target: CombatantId, action: Action) -> Self {
        Self::new(actor, Some(target), action)
    }

    /// Request that only affects the actor (fortify, hold)
    pub fn solo(actor: CombatantId, action: Action) -> Self {
        Self::new(actor, None, action)
    }
}

/// One resolved action, recorded exactly once and never changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleAction {
    pub id: Uuid,
    pub war_id: WarId,
    pub turn: Turn,
    pub timestamp: Timestamp,
    pub actor: CombatantId,
    pub target: Option<CombatantId>,
    pub action: Action,
    pub action_points_spent: u32,
    pub outcome: BattleOutcome,
}
