//! Action resolution entry point
//!
//! Pure over its inputs: two combatant snapshots and a random source go in,
//! a [`BattleOutcome`] of deltas comes out. Snapshot-level validation runs
//! first, so a rejected action never consumes a random draw.

use crate::actions::catalog::{Action, ActionCategory};
use crate::combat::air::{self, AirInput};
use crate::combat::constants::FormulaConstants;
use crate::combat::ground::{self, GroundInput};
use crate::combat::naval::{self, NavalInput};
use crate::combat::outcome::BattleOutcome;
use crate::combat::random::RandomSource;
use crate::combat::strike;
use crate::core::error::ActionError;
use crate::war::combatant::Combatant;
use crate::war::control::{enforce_exclusivity, ControlDelta, ControlFlag};

/// Validate an action against the two snapshots it would use
pub fn check(
    action: &Action,
    attacker: &Combatant,
    defender: Option<&Combatant>,
) -> Result<(), ActionError> {
    if !attacker.is_active() {
        return Err(ActionError::CombatantNotEligible(attacker.id));
    }

    let kind = action.kind();
    match (kind.requires_target(), defender) {
        (true, None) => {
            return Err(ActionError::InvalidTarget(format!("{action} needs a target")));
        }
        (true, Some(defender)) => {
            if defender.id == attacker.id {
                return Err(ActionError::InvalidTarget("cannot target yourself".into()));
            }
            if !defender.is_active() {
                return Err(ActionError::CombatantNotEligible(defender.id));
            }
        }
        (false, Some(_)) => {
            return Err(ActionError::InvalidTarget(format!("{action} takes no target")));
        }
        (false, None) => {}
    }

    let commitments = action.commitments();
    if kind.category() == ActionCategory::Battle
        && commitments.iter().all(|&(_, committed)| committed == 0)
    {
        return Err(ActionError::NothingCommitted);
    }

    for (unit, committed) in commitments {
        let available = attacker.units.get(unit);
        if committed > available {
            return Err(ActionError::InsufficientUnits { unit, committed, available });
        }
    }

    Ok(())
}

/// Resolve one action between two snapshots
pub fn resolve<R: RandomSource + ?Sized>(
    action: &Action,
    attacker: &Combatant,
    defender: Option<&Combatant>,
    consts: &FormulaConstants,
    rng: &mut R,
) -> Result<BattleOutcome, ActionError> {
    check(action, attacker, defender)?;

    let mut outcome = match (*action, defender) {
        (Action::GroundAttack { soldiers, tanks }, Some(defender)) => {
            ground::resolve(&GroundInput::new(soldiers, tanks, attacker, defender), consts, rng)
        }
        (Action::Airstrike { aircraft, target }, Some(defender)) => {
            air::resolve(&AirInput::new(aircraft, target, defender), consts, rng)
        }
        (Action::NavalAttack { ships, target }, Some(defender)) => {
            naval::resolve(&NavalInput::new(ships, target, defender), consts, rng)
        }
        (Action::MissileStrike, Some(_)) => strike::resolve_missile(consts, rng),
        (Action::NuclearStrike, Some(_)) => strike::resolve_nuke(consts, rng),
        (Action::Fortify, _) => BattleOutcome {
            attacker_control: ControlDelta::grant(ControlFlag::Fortified),
            ..BattleOutcome::default()
        },
        (Action::Hold, _) => BattleOutcome::default(),
        (_, None) => {
            return Err(ActionError::InvalidTarget(format!("{action} needs a target")));
        }
    };

    enforce_exclusivity(&outcome.attacker_control, &mut outcome.defender_control);
    Ok(outcome)
}
