//! Action definitions and catalog

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::ActionError;

/// Military unit and stockpile kinds a combatant holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Soldiers,
    Tanks,
    Aircraft,
    Ships,
    Missiles,
    Nukes,
}

/// Cost-table key for an action
///
/// Naval attacks split into two kinds because engaging a fleet is cheaper
/// than bombarding or contesting control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    GroundAttack,
    Airstrike,
    NavalEngagement,
    NavalBombardment,
    MissileStrike,
    NuclearStrike,
    Fortify,
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    /// Roll contest between two combatants
    Battle,
    /// Unopposed strike against another combatant
    Strike,
    /// Affects only the actor
    Defensive,
    /// Costs nothing, changes nothing but the activity clock
    NonCombat,
}

impl ActionKind {
    pub const ALL: [ActionKind; 8] = [
        ActionKind::GroundAttack,
        ActionKind::Airstrike,
        ActionKind::NavalEngagement,
        ActionKind::NavalBombardment,
        ActionKind::MissileStrike,
        ActionKind::NuclearStrike,
        ActionKind::Fortify,
        ActionKind::Hold,
    ];

    pub fn category(&self) -> ActionCategory {
        match self {
            ActionKind::GroundAttack
            | ActionKind::Airstrike
            | ActionKind::NavalEngagement
            | ActionKind::NavalBombardment => ActionCategory::Battle,
            ActionKind::MissileStrike | ActionKind::NuclearStrike => ActionCategory::Strike,
            ActionKind::Fortify => ActionCategory::Defensive,
            ActionKind::Hold => ActionCategory::NonCombat,
        }
    }

    /// Whether the action is aimed at another combatant
    pub fn requires_target(&self) -> bool {
        matches!(self.category(), ActionCategory::Battle | ActionCategory::Strike)
    }
}

impl FromStr for ActionKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ground_attack" | "ground" => Ok(ActionKind::GroundAttack),
            "airstrike" | "air" => Ok(ActionKind::Airstrike),
            "naval_engagement" => Ok(ActionKind::NavalEngagement),
            "naval_bombardment" => Ok(ActionKind::NavalBombardment),
            "missile_strike" | "missile" => Ok(ActionKind::MissileStrike),
            "nuclear_strike" | "nuke" => Ok(ActionKind::NuclearStrike),
            "fortify" => Ok(ActionKind::Fortify),
            "hold" => Ok(ActionKind::Hold),
            other => Err(ActionError::InvalidTarget(format!("unknown action '{other}'"))),
        }
    }
}

/// What an airstrike is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirTarget {
    /// Dogfight against the defender's air force
    Aircraft,
    Soldiers,
    Tanks,
    Ships,
}

impl FromStr for AirTarget {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aircraft" => Ok(AirTarget::Aircraft),
            "soldiers" => Ok(AirTarget::Soldiers),
            "tanks" => Ok(AirTarget::Tanks),
            "ships" => Ok(AirTarget::Ships),
            other => Err(ActionError::InvalidTarget(format!("unknown air target '{other}'"))),
        }
    }
}

/// What a naval attack is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavalTarget {
    Ships,
    Infrastructure,
    GroundControl,
    AirSuperiority,
}

impl FromStr for NavalTarget {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ships" => Ok(NavalTarget::Ships),
            "infrastructure" => Ok(NavalTarget::Infrastructure),
            "ground_control" => Ok(NavalTarget::GroundControl),
            "air_superiority" => Ok(NavalTarget::AirSuperiority),
            other => Err(ActionError::InvalidTarget(format!("unknown naval target '{other}'"))),
        }
    }
}

/// An action request with its kind-specific payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    GroundAttack { soldiers: u64, tanks: u64 },
    Airstrike { aircraft: u64, target: AirTarget },
    NavalAttack { ships: u64, target: NavalTarget },
    MissileStrike,
    NuclearStrike,
    Fortify,
    Hold,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::GroundAttack { .. } => ActionKind::GroundAttack,
            Action::Airstrike { .. } => ActionKind::Airstrike,
            Action::NavalAttack { target: NavalTarget::Ships, .. } => ActionKind::NavalEngagement,
            Action::NavalAttack { .. } => ActionKind::NavalBombardment,
            Action::MissileStrike => ActionKind::MissileStrike,
            Action::NuclearStrike => ActionKind::NuclearStrike,
            Action::Fortify => ActionKind::Fortify,
            Action::Hold => ActionKind::Hold,
        }
    }

    /// Units (or stockpile items) the action puts at risk
    pub fn commitments(&self) -> Vec<(UnitKind, u64)> {
        match *self {
            Action::GroundAttack { soldiers, tanks } => {
                vec![(UnitKind::Soldiers, soldiers), (UnitKind::Tanks, tanks)]
            }
            Action::Airstrike { aircraft, .. } => vec![(UnitKind::Aircraft, aircraft)],
            Action::NavalAttack { ships, .. } => vec![(UnitKind::Ships, ships)],
            Action::MissileStrike => vec![(UnitKind::Missiles, 1)],
            Action::NuclearStrike => vec![(UnitKind::Nukes, 1)],
            Action::Fortify | Action::Hold => vec![],
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::GroundAttack { soldiers, tanks } => {
                write!(f, "ground attack ({soldiers} soldiers, {tanks} tanks)")
            }
            Action::Airstrike { aircraft, target } => {
                write!(f, "airstrike on {target:?} ({aircraft} aircraft)")
            }
            Action::NavalAttack { ships, target } => {
                write!(f, "naval attack on {target:?} ({ships} ships)")
            }
            Action::MissileStrike => write!(f, "missile strike"),
            Action::NuclearStrike => write!(f, "nuclear strike"),
            Action::Fortify => write!(f, "fortify"),
            Action::Hold => write!(f, "hold"),
        }
    }
}
