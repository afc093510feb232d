//! Ground battle resolution
//!
//! Soldiers and tanks fight as one combined strength. The discrete tier
//! decides resistance damage and control changes. The continuous roll value
//! shifts casualties toward the side the matchup favours.

use crate::combat::constants::FormulaConstants;
use crate::combat::outcome::{clamp_losses, resistance_damage, BattleOutcome, UnitLosses};
use crate::combat::random::RandomSource;
use crate::combat::roll::{self, VictoryTier};
use crate::war::combatant::Combatant;
use crate::war::control::{ControlDelta, ControlFlag};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundInput {
    pub soldiers: u64,
    pub tanks: u64,
    pub attacker_munitions: bool,
    pub attacker_air_superiority: bool,
    pub defender_soldiers: u64,
    pub defender_tanks: u64,
    pub defender_munitions: bool,
    pub defender_fortified: bool,
}

impl GroundInput {
    pub fn new(soldiers: u64, tanks: u64, attacker: &Combatant, defender: &Combatant) -> Self {
        Self {
            soldiers,
            tanks,
            attacker_munitions: attacker.has_munitions,
            attacker_air_superiority: attacker.control.air_superiority,
            defender_soldiers: defender.units.soldiers,
            defender_tanks: defender.units.tanks,
            defender_munitions: defender.has_munitions,
            defender_fortified: defender.control.fortified,
        }
    }
}

pub fn soldier_strength(soldiers: u64, munitions: bool, consts: &FormulaConstants) -> f64 {
    let multiplier = if munitions { consts.munitions_multiplier } else { 1.0 };
    soldiers as f64 * multiplier
}

pub fn tank_strength(tanks: u64, consts: &FormulaConstants) -> f64 {
    tanks as f64 * consts.tank_strength
}

/// `soldiers * (1.75 with munitions) + tanks * 40`
pub fn strength(soldiers: u64, tanks: u64, munitions: bool, consts: &FormulaConstants) -> f64 {
    soldier_strength(soldiers, munitions, consts) + tank_strength(tanks, consts)
}

/// Casualty divisors for attacker and defender at roll value `r`
///
/// At `r = 3` the attacker divides by the high factor (fewer losses) and the
/// defender by the low one; the two always sum to `low + high`.
pub fn damage_factors(r: f64, consts: &FormulaConstants) -> (f64, f64) {
    let low = consts.ground_factor_low;
    let high = consts.ground_factor_high;
    let att_factor = (low * (3.0 - r) + high * r) / 3.0;
    let def_factor = low + high - att_factor;
    (att_factor, def_factor)
}

pub fn resolve<R: RandomSource + ?Sized>(
    input: &GroundInput,
    consts: &FormulaConstants,
    rng: &mut R,
) -> BattleOutcome {
    let att_soldiers = soldier_strength(input.soldiers, input.attacker_munitions, consts);
    let att_tanks = tank_strength(input.tanks, consts);
    let def_soldiers = soldier_strength(input.defender_soldiers, input.defender_munitions, consts);
    let mut def_tanks = tank_strength(input.defender_tanks, consts);
    if input.attacker_air_superiority {
        def_tanks *= consts.air_superiority_tank_penalty;
    }

    let attacker_strength = att_soldiers + att_tanks;
    let defender_strength = def_soldiers + def_tanks;

    let roll = roll::resolve(attacker_strength, defender_strength, consts, rng);
    let (att_factor, def_factor) = damage_factors(roll.roll_value, consts);

    let fortification = if input.defender_fortified {
        consts.fortification_multiplier
    } else {
        1.0
    };

    let attacker_losses = UnitLosses {
        soldiers: clamp_losses(
            defender_strength * consts.ground_soldier_loss_rate * fortification / att_factor,
            input.soldiers,
        ),
        tanks: clamp_losses(
            defender_strength * consts.ground_tank_loss_rate * fortification / att_factor,
            input.tanks,
        ),
        ..UnitLosses::default()
    };

    let defender_losses = UnitLosses {
        soldiers: clamp_losses(
            attacker_strength * consts.ground_soldier_loss_rate / def_factor,
            input.defender_soldiers,
        ),
        tanks: clamp_losses(
            attacker_strength * consts.ground_tank_loss_rate / def_factor,
            input.defender_tanks,
        ),
        ..UnitLosses::default()
    };

    let soldier_edge = input.soldiers as f64 - input.defender_soldiers as f64 * 0.5;
    let tank_edge = input.tanks as f64 - input.defender_tanks as f64 * 0.5;
    let infrastructure_damage = ((soldier_edge * consts.ground_infra_per_soldier
        + tank_edge * consts.ground_infra_per_tank)
        * roll.win_fraction())
    .max(0.0);

    let mut attacker_control = ControlDelta::default();
    let mut defender_control = ControlDelta::default();
    if roll.tier == VictoryTier::ImmenseTriumph {
        attacker_control = ControlDelta::grant(ControlFlag::GroundControl);
    }
    if !roll.tier.is_failure() {
        defender_control = ControlDelta::revoke(ControlFlag::Fortified);
    }

    tracing::debug!(
        attacker_strength,
        defender_strength,
        wins = roll.wins_for_attacker,
        roll_value = roll.roll_value,
        "Ground battle resolved"
    );

    BattleOutcome {
        roll: Some(roll),
        attacker_losses,
        defender_losses,
        resistance_damage: resistance_damage(roll.tier, consts.ground_resistance),
        infrastructure_damage,
        attacker_control,
        defender_control,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::random::ScriptedRolls;

    fn example_input() -> GroundInput {
        GroundInput {
            soldiers: 1000,
            tanks: 100,
            attacker_munitions: true,
            attacker_air_superiority: false,
            defender_soldiers: 500,
            defender_tanks: 50,
            defender_munitions: true,
            defender_fortified: false,
        }
    }

    #[test]
    fn test_strength_formula() {
        let c = FormulaConstants::v2();
        assert_eq!(strength(1000, 100, true, &c), 5750.0);
        assert_eq!(strength(500, 50, true, &c), 2875.0);
        assert_eq!(strength(1000, 0, false, &c), 1000.0);
    }

    #[test]
    fn test_damage_factors_band() {
        let c = FormulaConstants::v2();
        assert_eq!(damage_factors(0.0, &c), (1680.0, 1800.0));
        assert_eq!(damage_factors(3.0, &c), (1800.0, 1680.0));
        let (a, d) = damage_factors(1.5, &c);
        assert_eq!(a, d);
    }

    #[test]
    fn test_immense_triumph_example() {
        let c = FormulaConstants::v2();
        let outcome = resolve(&example_input(), &c, &mut ScriptedRolls::attacker_sweeps());

        assert_eq!(outcome.tier(), Some(VictoryTier::ImmenseTriumph));
        assert_eq!(outcome.resistance_damage, -10);
        assert_eq!(outcome.attacker_control.ground_control, Some(true));
        assert_eq!(outcome.defender_control.fortified, Some(false));
        assert!(outcome.defender_losses.soldiers <= 500);
        assert!(outcome.defender_losses.tanks <= 50);
        assert!(outcome.attacker_losses.soldiers <= 1000);
        assert!(outcome.attacker_losses.tanks <= 100);
        assert!(outcome.infrastructure_damage > 0.0);
    }

    #[test]
    fn test_failure_changes_no_flags() {
        let c = FormulaConstants::v2();
        let outcome = resolve(&example_input(), &c, &mut ScriptedRolls::defender_sweeps());
        assert_eq!(outcome.tier(), Some(VictoryTier::UtterFailure));
        assert_eq!(outcome.resistance_damage, 0);
        assert_eq!(outcome.infrastructure_damage, 0.0);
        assert!(outcome.attacker_control.is_empty());
        assert!(outcome.defender_control.is_empty());
    }

    #[test]
    fn test_favoured_attacker_loses_less() {
        let c = FormulaConstants::v2();
        let outcome = resolve(&example_input(), &c, &mut ScriptedRolls::attacker_sweeps());
        assert!(outcome.attacker_losses.soldiers < outcome.defender_losses.soldiers);
    }

    #[test]
    fn test_fortification_raises_attacker_losses() {
        let c = FormulaConstants::v2();
        let open = resolve(&example_input(), &c, &mut ScriptedRolls::attacker_sweeps());
        let fortified_input = GroundInput { defender_fortified: true, ..example_input() };
        let fortified = resolve(&fortified_input, &c, &mut ScriptedRolls::attacker_sweeps());
        assert!(fortified.attacker_losses.soldiers > open.attacker_losses.soldiers);
    }

    #[test]
    fn test_air_superiority_weakens_defender_tanks() {
        let c = FormulaConstants::v2();
        let input = GroundInput { attacker_air_superiority: true, ..example_input() };
        let with_air = resolve(&input, &c, &mut ScriptedRolls::attacker_sweeps());
        let without = resolve(&example_input(), &c, &mut ScriptedRolls::attacker_sweeps());
        assert!(with_air.attacker_losses.soldiers < without.attacker_losses.soldiers);
    }

    #[test]
    fn test_casualties_clamped_to_small_forces() {
        let c = FormulaConstants::v2();
        let input = GroundInput {
            soldiers: 3,
            tanks: 0,
            defender_soldiers: 2,
            defender_tanks: 0,
            ..example_input()
        };
        let huge = GroundInput { soldiers: 1_000_000, tanks: 100_000, ..input };
        let outcome = resolve(&huge, &c, &mut ScriptedRolls::attacker_sweeps());
        assert_eq!(outcome.defender_losses.soldiers, 2);
        assert_eq!(outcome.defender_losses.tanks, 0);

        let outcome = resolve(&input, &c, &mut ScriptedRolls::defender_sweeps());
        assert!(outcome.attacker_losses.soldiers <= 3);
        assert_eq!(outcome.attacker_losses.tanks, 0);
    }
}
