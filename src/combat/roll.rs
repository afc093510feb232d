//! Roll contest
//!
//! Two independent measures come out of a contest between two strengths:
//!
//! - The discrete **victory tier**, decided by how many of three sample pairs
//!   the attacker wins. This drives resistance damage and control changes.
//! - The continuous **roll value** in `[0, 3]`, an expected-wins estimate
//!   computed from the strengths alone. Ground casualties scale with it.

use serde::{Deserialize, Serialize};

use crate::combat::constants::FormulaConstants;
use crate::combat::random::RandomSource;

pub const ROLLS_PER_CONTEST: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VictoryTier {
    UtterFailure,
    PyrrhicVictory,
    ModerateSuccess,
    ImmenseTriumph,
}

impl VictoryTier {
    /// The only valid mapping: 3 immense, 2 moderate, 1 pyrrhic, 0 failure
    pub fn from_wins(wins: u8) -> Self {
        match wins {
            0 => VictoryTier::UtterFailure,
            1 => VictoryTier::PyrrhicVictory,
            2 => VictoryTier::ModerateSuccess,
            _ => VictoryTier::ImmenseTriumph,
        }
    }

    pub fn wins(self) -> u8 {
        match self {
            VictoryTier::UtterFailure => 0,
            VictoryTier::PyrrhicVictory => 1,
            VictoryTier::ModerateSuccess => 2,
            VictoryTier::ImmenseTriumph => 3,
        }
    }

    pub fn is_failure(self) -> bool {
        self == VictoryTier::UtterFailure
    }
}

/// Result of a three-roll contest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub attacker_samples: [f64; ROLLS_PER_CONTEST],
    pub defender_samples: [f64; ROLLS_PER_CONTEST],
    pub wins_for_attacker: u8,
    pub tier: VictoryTier,
    /// Continuous roll value for the same strengths
    pub roll_value: f64,
}

impl RollOutcome {
    /// Share of sample pairs the attacker won, in `[0, 1]`
    pub fn win_fraction(&self) -> f64 {
        f64::from(self.wins_for_attacker) / ROLLS_PER_CONTEST as f64
    }

    pub fn attacker_total(&self) -> f64 {
        self.attacker_samples.iter().sum()
    }

    pub fn defender_total(&self) -> f64 {
        self.defender_samples.iter().sum()
    }

    pub fn defender_mean(&self) -> f64 {
        self.defender_total() / ROLLS_PER_CONTEST as f64
    }
}

/// Run the contest. Draws alternate attacker, defender for each pair.
///
/// A pair goes to whichever sample is strictly greater; ties go to the defender.
pub fn resolve<R: RandomSource + ?Sized>(
    attacker_strength: f64,
    defender_strength: f64,
    consts: &FormulaConstants,
    rng: &mut R,
) -> RollOutcome {
    let attacker_strength = attacker_strength.max(0.0);
    let defender_strength = defender_strength.max(0.0);

    let mut attacker_samples = [0.0; ROLLS_PER_CONTEST];
    let mut defender_samples = [0.0; ROLLS_PER_CONTEST];
    let mut wins = 0u8;

    for i in 0..ROLLS_PER_CONTEST {
        attacker_samples[i] = attacker_strength * rng.uniform(consts.sample_min, 1.0);
        defender_samples[i] = defender_strength * rng.uniform(consts.sample_min, 1.0);
        if attacker_samples[i] > defender_samples[i] {
            wins += 1;
        }
    }

    RollOutcome {
        attacker_samples,
        defender_samples,
        wins_for_attacker: wins,
        tier: VictoryTier::from_wins(wins),
        roll_value: roll_value(attacker_strength, defender_strength, consts),
    }
}

/// Continuous roll value in `[0, 3]`
///
/// 3 when the attacker's weakest possible sample beats the defender's
/// strongest (a guaranteed sweep), 0 in the mirrored case, and a linear blend
/// of the two overlaps in between. Equal strengths give 1.5.
pub fn roll_value(
    attacker_strength: f64,
    defender_strength: f64,
    consts: &FormulaConstants,
) -> f64 {
    if attacker_strength <= 0.0 {
        return 0.0;
    }
    let floor = consts.sample_min;
    let up = attacker_strength - defender_strength * floor;
    let down = defender_strength - attacker_strength * floor;

    if down <= 0.0 {
        return ROLLS_PER_CONTEST as f64;
    }
    if up <= 0.0 {
        return 0.0;
    }
    (ROLLS_PER_CONTEST as f64 * up / (up + down)).clamp(0.0, ROLLS_PER_CONTEST as f64)
}
