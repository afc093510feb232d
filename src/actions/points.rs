//! Military action point (MAP) economy
//!
//! Every action has a fixed cost. Costs are checked and deducted as a single
//! step; a combatant that cannot pay is left exactly as it was.

use serde::{Deserialize, Serialize};

use crate::actions::catalog::ActionKind;
use crate::core::error::ActionError;
use crate::war::combatant::Combatant;

/// Action point cost per action kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionCosts {
    pub ground_attack: u32,
    pub airstrike: u32,
    pub naval_engagement: u32,
    pub naval_bombardment: u32,
    pub missile_strike: u32,
    pub nuclear_strike: u32,
    pub fortify: u32,
    pub hold: u32,
}

impl Default for ActionCosts {
    fn default() -> Self {
        Self {
            ground_attack: 3,
            airstrike: 4,
            naval_engagement: 4,
            naval_bombardment: 5,
            missile_strike: 8,
            nuclear_strike: 12,
            fortify: 3,
            hold: 0,
        }
    }
}

impl ActionCosts {
    pub fn cost(&self, kind: ActionKind) -> u32 {
        match kind {
            ActionKind::GroundAttack => self.ground_attack,
            ActionKind::Airstrike => self.airstrike,
            ActionKind::NavalEngagement => self.naval_engagement,
            ActionKind::NavalBombardment => self.naval_bombardment,
            ActionKind::MissileStrike => self.missile_strike,
            ActionKind::NuclearStrike => self.nuclear_strike,
            ActionKind::Fortify => self.fortify,
            ActionKind::Hold => self.hold,
        }
    }
}

pub fn can_afford(combatant: &Combatant, kind: ActionKind, costs: &ActionCosts) -> bool {
    combatant.action_points >= costs.cost(kind)
}

/// Deduct the cost of `kind`, returning the points left
pub fn apply_cost(
    combatant: &mut Combatant,
    kind: ActionKind,
    costs: &ActionCosts,
) -> Result<u32, ActionError> {
    let required = costs.cost(kind);
    if combatant.action_points < required {
        return Err(ActionError::InsufficientActionPoints {
            kind,
            required,
            available: combatant.action_points,
        });
    }
    combatant.action_points -= required;
    Ok(combatant.action_points)
}

/// Grant `amount` points up to `cap`, returning how many were actually added
///
/// Eliminated combatants and spectators do not regenerate.
pub fn regenerate(combatant: &mut Combatant, amount: u32, cap: u32) -> u32 {
    if !combatant.is_active() {
        return 0;
    }
    let before = combatant.action_points;
    if before >= cap {
        return 0;
    }
    combatant.action_points = before.saturating_add(amount).min(cap);
    combatant.action_points - before
}
