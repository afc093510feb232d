//! Airstrike resolution
//!
//! Aircraft count is the strength on both sides. A dogfight trades aircraft
//! directly; a strike on another domain kills that unit type and, if the
//! defender still flies, costs both air forces some attrition.

use crate::actions::catalog::AirTarget;
use crate::combat::constants::FormulaConstants;
use crate::combat::outcome::{clamp_losses, resistance_damage, BattleOutcome, UnitLosses};
use crate::combat::random::RandomSource;
use crate::combat::roll::{self, RollOutcome, VictoryTier};
use crate::war::combatant::Combatant;
use crate::war::control::{ControlDelta, ControlFlag};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirInput {
    pub aircraft: u64,
    pub target: AirTarget,
    pub defender_aircraft: u64,
    pub defender_soldiers: u64,
    pub defender_tanks: u64,
    pub defender_ships: u64,
    pub defender_fortified: bool,
}

impl AirInput {
    pub fn new(aircraft: u64, target: AirTarget, defender: &Combatant) -> Self {
        Self {
            aircraft,
            target,
            defender_aircraft: defender.units.aircraft,
            defender_soldiers: defender.units.soldiers,
            defender_tanks: defender.units.tanks,
            defender_ships: defender.units.ships,
            defender_fortified: defender.control.fortified,
        }
    }
}

/// `min(held, held * fraction + floor, edge * coefficient * jitter)`, never negative
fn strike_kills(held: u64, cap: (f64, f64), coefficient: f64, edge: f64, jitter: f64) -> u64 {
    let held_f = held as f64;
    let raw = held_f.min(held_f * cap.0 + cap.1).min(edge * coefficient * jitter);
    clamp_losses(raw, held)
}

/// Aircraft traded over the three rolls at the given per-sample coefficients
fn aircraft_exchange(
    roll: &RollOutcome,
    input: &AirInput,
    attacker_coefficient: f64,
    defender_coefficient: f64,
    fortification: f64,
) -> (u64, u64) {
    let attacker_lost = clamp_losses(
        roll.defender_total() * attacker_coefficient * fortification,
        input.aircraft,
    );
    let defender_lost = clamp_losses(
        roll.attacker_total() * defender_coefficient,
        input.defender_aircraft,
    );
    (attacker_lost, defender_lost)
}

pub fn resolve<R: RandomSource + ?Sized>(
    input: &AirInput,
    consts: &FormulaConstants,
    rng: &mut R,
) -> BattleOutcome {
    let roll = roll::resolve(input.aircraft as f64, input.defender_aircraft as f64, consts, rng);
    let jitter = rng.uniform(consts.air_jitter_min, consts.air_jitter_max);

    let fortification = if input.defender_fortified {
        consts.fortification_multiplier
    } else {
        1.0
    };
    let edge = input.aircraft as f64 - input.defender_aircraft as f64 * 0.5;

    let mut attacker_losses = UnitLosses::default();
    let mut defender_losses = UnitLosses::default();

    match input.target {
        AirTarget::Aircraft => {
            let (att, def) = aircraft_exchange(
                &roll,
                input,
                consts.dogfight_attacker_loss,
                consts.dogfight_defender_loss,
                fortification,
            );
            attacker_losses.aircraft = att;
            defender_losses.aircraft = def;
        }
        AirTarget::Soldiers | AirTarget::Tanks | AirTarget::Ships => {
            match input.target {
                AirTarget::Soldiers => {
                    defender_losses.soldiers = strike_kills(
                        input.defender_soldiers,
                        consts.air_cap_soldiers,
                        consts.air_kill_soldiers,
                        edge,
                        jitter,
                    );
                }
                AirTarget::Tanks => {
                    defender_losses.tanks = strike_kills(
                        input.defender_tanks,
                        consts.air_cap_tanks,
                        consts.air_kill_tanks,
                        edge,
                        jitter,
                    );
                }
                _ => {
                    defender_losses.ships = strike_kills(
                        input.defender_ships,
                        consts.air_cap_ships,
                        consts.air_kill_ships,
                        edge,
                        jitter,
                    );
                }
            }

            if input.defender_aircraft > 0 {
                let (att, def) = aircraft_exchange(
                    &roll,
                    input,
                    consts.air_attrition_attacker_loss,
                    consts.air_attrition_defender_loss,
                    fortification,
                );
                attacker_losses.aircraft = att;
                defender_losses.aircraft = def;
            }
        }
    }

    let infrastructure_damage =
        (edge * consts.air_infra_per_aircraft * jitter * roll.win_fraction()).max(0.0);

    let attacker_control =
        if input.target == AirTarget::Aircraft && roll.tier == VictoryTier::ImmenseTriumph {
            ControlDelta::grant(ControlFlag::AirSuperiority)
        } else {
            ControlDelta::default()
        };

    tracing::debug!(
        aircraft = input.aircraft,
        defender_aircraft = input.defender_aircraft,
        target = ?input.target,
        wins = roll.wins_for_attacker,
        jitter,
        "Airstrike resolved"
    );

    BattleOutcome {
        roll: Some(roll),
        attacker_losses,
        defender_losses,
        resistance_damage: resistance_damage(roll.tier, consts.air_resistance),
        infrastructure_damage,
        attacker_control,
        defender_control: ControlDelta::default(),
    }
}
