//! Naval attack resolution

use crate::actions::catalog::NavalTarget;
use crate::combat::constants::FormulaConstants;
use crate::combat::outcome::{clamp_losses, resistance_damage, BattleOutcome, UnitLosses};
use crate::combat::random::RandomSource;
use crate::combat::roll::{self, VictoryTier};
use crate::war::combatant::Combatant;
use crate::war::control::{ControlDelta, ControlFlag};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavalInput {
    pub ships: u64,
    pub target: NavalTarget,
    pub defender_ships: u64,
    pub defender_fortified: bool,
}

impl NavalInput {
    pub fn new(ships: u64, target: NavalTarget, defender: &Combatant) -> Self {
        Self {
            ships,
            target,
            defender_ships: defender.units.ships,
            defender_fortified: defender.control.fortified,
        }
    }
}

/// Loss multiplier on the defender's fleet for a target
///
/// Hunting ships sinks more of them; contesting control sinks fewer.
pub fn multiplier(target: NavalTarget, consts: &FormulaConstants) -> f64 {
    let base = consts.naval_multiplier_baseline;
    match target {
        NavalTarget::Ships => base + consts.naval_ships_bonus,
        NavalTarget::Infrastructure => base,
        NavalTarget::GroundControl | NavalTarget::AirSuperiority => {
            base - consts.naval_control_penalty
        }
    }
}

pub fn resolve<R: RandomSource + ?Sized>(
    input: &NavalInput,
    consts: &FormulaConstants,
    rng: &mut R,
) -> BattleOutcome {
    let roll = roll::resolve(input.ships as f64, input.defender_ships as f64, consts, rng);
    let divisor = consts.naval_base_divisor;

    let fortification = if input.defender_fortified {
        consts.fortification_multiplier
    } else {
        1.0
    };

    let defender_losses = UnitLosses {
        ships: clamp_losses(
            input.ships as f64 / (divisor / multiplier(input.target, consts)),
            input.defender_ships,
        ),
        ..UnitLosses::default()
    };
    let attacker_losses = UnitLosses {
        ships: clamp_losses(
            roll.defender_mean() / divisor * consts.naval_attacker_weight * fortification,
            input.ships,
        ),
        ..UnitLosses::default()
    };

    let target_scale = match input.target {
        NavalTarget::Infrastructure => consts.naval_infra_target_scale,
        NavalTarget::Ships => consts.naval_ships_target_scale,
        NavalTarget::GroundControl | NavalTarget::AirSuperiority => 0.0,
    };
    let edge = input.ships as f64 - input.defender_ships as f64 * 0.5;
    let infrastructure_damage =
        (edge * consts.naval_infra_per_ship * roll.win_fraction() * target_scale).max(0.0);

    let mut attacker_control = ControlDelta::default();
    let mut defender_control = ControlDelta::default();
    if roll.tier == VictoryTier::ImmenseTriumph {
        match input.target {
            NavalTarget::Ships | NavalTarget::Infrastructure => {
                attacker_control = ControlDelta::grant(ControlFlag::Blockade);
            }
            NavalTarget::GroundControl => {
                defender_control = ControlDelta::revoke(ControlFlag::GroundControl);
            }
            NavalTarget::AirSuperiority => {
                defender_control = ControlDelta::revoke(ControlFlag::AirSuperiority);
            }
        }
    }

    tracing::debug!(
        ships = input.ships,
        defender_ships = input.defender_ships,
        target = ?input.target,
        wins = roll.wins_for_attacker,
        "Naval attack resolved"
    );

    BattleOutcome {
        roll: Some(roll),
        attacker_losses,
        defender_losses,
        resistance_damage: resistance_damage(roll.tier, consts.naval_resistance),
        infrastructure_damage,
        attacker_control,
        defender_control,
    }
}
