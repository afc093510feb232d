//! Missile and nuclear strikes
//!
//! No contest: the weapon always lands. One stockpile item is spent per strike.

use crate::combat::constants::FormulaConstants;
use crate::combat::outcome::{BattleOutcome, UnitLosses};
use crate::combat::random::RandomSource;
use crate::war::control::{ControlDelta, ControlFlag};

pub fn resolve_missile<R: RandomSource + ?Sized>(
    consts: &FormulaConstants,
    rng: &mut R,
) -> BattleOutcome {
    let (lo, hi) = consts.missile_infra;
    let infrastructure_damage = rng.uniform(lo, hi);
    tracing::debug!(infrastructure_damage, "Missile strike resolved");

    BattleOutcome {
        roll: None,
        attacker_losses: UnitLosses { missiles: 1, ..UnitLosses::default() },
        defender_losses: UnitLosses::default(),
        resistance_damage: -consts.missile_resistance,
        infrastructure_damage,
        attacker_control: ControlDelta::default(),
        defender_control: ControlDelta::default(),
    }
}

/// Like a missile, heavier, and it also breaks fortifications
pub fn resolve_nuke<R: RandomSource + ?Sized>(
    consts: &FormulaConstants,
    rng: &mut R,
) -> BattleOutcome {
    let (lo, hi) = consts.nuke_infra;
    let infrastructure_damage = rng.uniform(lo, hi);
    tracing::debug!(infrastructure_damage, "Nuclear strike resolved");

    BattleOutcome {
        roll: None,
        attacker_losses: UnitLosses { nukes: 1, ..UnitLosses::default() },
        defender_losses: UnitLosses::default(),
        resistance_damage: -consts.nuke_resistance,
        infrastructure_damage,
        attacker_control: ControlDelta::default(),
        defender_control: ControlDelta::revoke(ControlFlag::Fortified),
    }
}
