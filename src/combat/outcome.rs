//! Shared result shape for every resolver

use serde::{Deserialize, Serialize};

use crate::actions::catalog::UnitKind;
use crate::combat::constants::TierDamage;
use crate::combat::roll::{RollOutcome, VictoryTier};
use crate::war::control::ControlDelta;

/// Units lost by one side in one action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitLosses {
    pub soldiers: u64,
    pub tanks: u64,
    pub aircraft: u64,
    pub ships: u64,
    pub missiles: u64,
    pub nukes: u64,
}

impl UnitLosses {
    pub fn get(&self, unit: UnitKind) -> u64 {
        match unit {
            UnitKind::Soldiers => self.soldiers,
            UnitKind::Tanks => self.tanks,
            UnitKind::Aircraft => self.aircraft,
            UnitKind::Ships => self.ships,
            UnitKind::Missiles => self.missiles,
            UnitKind::Nukes => self.nukes,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Everything one resolved action produces
///
/// Deltas only: the caller applies them to its own snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleOutcome {
    /// Absent for actions without a contest (strikes, fortify, hold)
    pub roll: Option<RollOutcome>,
    pub attacker_losses: UnitLosses,
    pub defender_losses: UnitLosses,
    /// Change to the defender's resistance, zero or negative
    pub resistance_damage: i32,
    /// Infrastructure removed from the defender, never negative
    pub infrastructure_damage: f64,
    pub attacker_control: ControlDelta,
    pub defender_control: ControlDelta,
}

impl BattleOutcome {
    pub fn tier(&self) -> Option<VictoryTier> {
        self.roll.map(|r| r.tier)
    }
}

/// Signed resistance change for a tier
pub fn resistance_damage(tier: VictoryTier, table: TierDamage) -> i32 {
    match tier {
        VictoryTier::ImmenseTriumph => -table.immense,
        VictoryTier::ModerateSuccess => -table.moderate,
        VictoryTier::PyrrhicVictory => -table.pyrrhic,
        VictoryTier::UtterFailure => 0,
    }
}

/// Round a casualty figure and clamp it to what the side actually has
pub(crate) fn clamp_losses(raw: f64, available: u64) -> u64 {
    if raw.is_nan() || raw <= 0.0 {
        return 0;
    }
    let rounded = raw.round();
    if rounded >= available as f64 {
        available
    } else {
        rounded as u64
    }
}
