//! Combat formula constants - all tunable values in one place
//!
//! Two tables exist. `V2` is canonical. `Legacy` reproduces the older air and
//! naval coefficients and is only for replaying historical battle logs.

use serde::{Deserialize, Serialize};

/// Which constants table resolvers use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormulaSet {
    #[default]
    V2,
    Legacy,
}

impl FormulaSet {
    pub fn constants(self) -> FormulaConstants {
        match self {
            FormulaSet::V2 => FormulaConstants::v2(),
            FormulaSet::Legacy => FormulaConstants::legacy(),
        }
    }
}

/// Resistance removed per victory tier, ordered immense/moderate/pyrrhic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierDamage {
    pub immense: i32,
    pub moderate: i32,
    pub pyrrhic: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormulaConstants {
    // === ROLL ===
    /// Each roll sample is `strength * uniform(sample_min, 1.0)`
    pub sample_min: f64,

    // === GROUND ===
    pub munitions_multiplier: f64,
    pub tank_strength: f64,
    /// Attack factor when the continuous roll is 0
    pub ground_factor_low: f64,
    /// Attack factor when the continuous roll is 3
    pub ground_factor_high: f64,
    pub ground_soldier_loss_rate: f64,
    pub ground_tank_loss_rate: f64,
    pub ground_infra_per_soldier: f64,
    pub ground_infra_per_tank: f64,
    /// Applied to defender tank strength when the attacker holds air superiority
    pub air_superiority_tank_penalty: f64,
    /// Applied to losses a fortified defender inflicts on the attacker
    pub fortification_multiplier: f64,

    // === AIR ===
    pub dogfight_attacker_loss: f64,
    pub dogfight_defender_loss: f64,
    pub air_attrition_attacker_loss: f64,
    pub air_attrition_defender_loss: f64,
    pub air_jitter_min: f64,
    pub air_jitter_max: f64,
    pub air_kill_soldiers: f64,
    pub air_kill_tanks: f64,
    pub air_kill_ships: f64,
    /// `(fraction, floor)` caps on per-strike kills
    pub air_cap_soldiers: (f64, f64),
    pub air_cap_tanks: (f64, f64),
    pub air_cap_ships: (f64, f64),
    pub air_infra_per_aircraft: f64,

    // === NAVAL ===
    pub naval_base_divisor: f64,
    pub naval_multiplier_baseline: f64,
    pub naval_ships_bonus: f64,
    pub naval_control_penalty: f64,
    pub naval_attacker_weight: f64,
    pub naval_infra_per_ship: f64,
    pub naval_infra_target_scale: f64,
    pub naval_ships_target_scale: f64,

    // === RESISTANCE ===
    pub ground_resistance: TierDamage,
    pub air_resistance: TierDamage,
    pub naval_resistance: TierDamage,

    // === STRIKES ===
    pub missile_resistance: i32,
    pub missile_infra: (f64, f64),
    pub nuke_resistance: i32,
    pub nuke_infra: (f64, f64),
}

impl FormulaConstants {
    pub fn v2() -> Self {
        Self {
            sample_min: 0.4,

            munitions_multiplier: 1.75,
            tank_strength: 40.0,
            ground_factor_low: 1680.0,
            ground_factor_high: 1800.0,
            ground_soldier_loss_rate: 30.0,
            ground_tank_loss_rate: 1.5,
            ground_infra_per_soldier: 0.000_606_061,
            ground_infra_per_tank: 0.01,
            air_superiority_tank_penalty: 0.66,
            fortification_multiplier: 1.25,

            dogfight_attacker_loss: 0.01,
            dogfight_defender_loss: 0.018_337,
            air_attrition_attacker_loss: 0.005,
            air_attrition_defender_loss: 0.009,
            air_jitter_min: 0.85,
            air_jitter_max: 1.05,
            air_kill_soldiers: 35.0,
            air_kill_tanks: 1.25,
            air_kill_ships: 0.0285,
            air_cap_soldiers: (0.75, 1000.0),
            air_cap_tanks: (0.75, 10.0),
            air_cap_ships: (0.5, 4.0),
            air_infra_per_aircraft: 0.353_535_35,

            naval_base_divisor: 8.0,
            naval_multiplier_baseline: 1.0,
            naval_ships_bonus: 0.25,
            naval_control_penalty: 0.25,
            naval_attacker_weight: 0.75,
            naval_infra_per_ship: 2.625,
            naval_infra_target_scale: 1.5,
            naval_ships_target_scale: 0.5,

            ground_resistance: TierDamage { immense: 10, moderate: 7, pyrrhic: 4 },
            air_resistance: TierDamage { immense: 12, moderate: 9, pyrrhic: 6 },
            naval_resistance: TierDamage { immense: 14, moderate: 11, pyrrhic: 8 },

            missile_resistance: 18,
            missile_infra: (100.0, 300.0),
            nuke_resistance: 25,
            nuke_infra: (300.0, 600.0),
        }
    }

    pub fn legacy() -> Self {
        Self {
            dogfight_attacker_loss: 0.015_385,
            dogfight_defender_loss: 0.009_091,
            air_attrition_attacker_loss: 0.007,
            air_attrition_defender_loss: 0.0085,
            naval_ships_bonus: 0.5,
            ..Self::v2()
        }
    }
}

impl Default for FormulaConstants {
    fn default() -> Self {
        Self::v2()
    }
}
