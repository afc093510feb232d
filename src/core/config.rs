//! Engine configuration with documented constants
//!
//! Everything a deployment may want to tune lives here: which combat
//! constants table is active, what each action costs, and how wars are paced.
//! Loaded from TOML; every section falls back to its defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::actions::points::ActionCosts;
use crate::combat::constants::{FormulaConstants, FormulaSet};
use crate::core::error::{EngineError, Result};

/// Pacing and starting allotments for a war
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarSettings {
    /// Participants required before a waiting war becomes active
    ///
    /// At least one of them must not be a spectator.
    pub min_participants: usize,

    /// Turn at which the war expires with no winner
    pub max_turns: u32,

    /// Wall-clock length of one turn, in seconds
    ///
    /// At the default (7200) a 60-turn war lasts five days.
    pub turn_duration_secs: u64,

    /// Seconds without any action after which an active war is abandoned
    ///
    /// Enforced by the periodic sweep, not by combat resolution.
    pub inactivity_window_secs: u64,

    /// Action points granted to each active participant per elapsed turn
    pub action_point_regen: u32,

    /// Action points a combatant holds when joining
    pub starting_action_points: u32,

    /// Action point capacity; regeneration never goes above this
    pub max_action_points: u32,

    /// Resistance a combatant holds when joining (1..=100)
    pub starting_resistance: u32,
}

impl Default for WarSettings {
    fn default() -> Self {
        Self {
            min_participants: 2,
            max_turns: 60,
            turn_duration_secs: 7200,
            inactivity_window_secs: 5 * 24 * 3600,
            action_point_regen: 1,
            starting_action_points: 6,
            max_action_points: 12,
            starting_resistance: 100,
        }
    }
}

impl WarSettings {
    pub fn turn_duration(&self) -> Duration {
        Duration::from_secs(self.turn_duration_secs)
    }

    pub fn inactivity_window(&self) -> Duration {
        Duration::from_secs(self.inactivity_window_secs)
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Which combat constants table resolvers use
    pub formulas: FormulaSet,
    /// Action point cost of each action kind
    pub costs: ActionCosts,
    /// War pacing
    pub war: WarSettings,
}

impl EngineConfig {
    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// The constants table selected by `formulas`
    pub fn constants(&self) -> FormulaConstants {
        self.formulas.constants()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let war = &self.war;

        if war.min_participants < 2 {
            return Err(EngineError::InvalidConfig(format!(
                "min_participants ({}) must be at least 2",
                war.min_participants
            )));
        }

        if war.max_turns == 0 {
            return Err(EngineError::InvalidConfig("max_turns must be positive".into()));
        }

        if war.turn_duration_secs == 0 {
            return Err(EngineError::InvalidConfig(
                "turn_duration_secs must be positive".into(),
            ));
        }

        if war.starting_action_points > war.max_action_points {
            return Err(EngineError::InvalidConfig(format!(
                "starting_action_points ({}) exceeds max_action_points ({})",
                war.starting_action_points, war.max_action_points
            )));
        }

        if !(1..=100).contains(&war.starting_resistance) {
            return Err(EngineError::InvalidConfig(format!(
                "starting_resistance ({}) must be in 1..=100",
                war.starting_resistance
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::catalog::ActionKind;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            formulas = "legacy"

            [war]
            max_turns = 30
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(config.formulas, FormulaSet::Legacy);
        assert_eq!(config.war.max_turns, 30);
        assert_eq!(config.war.min_participants, 2);
        assert_eq!(config.costs.cost(ActionKind::GroundAttack), 3);
    }

    #[test]
    fn test_cost_override() {
        let config = EngineConfig::from_toml_str(
            r#"
            [costs]
            missile_strike = 10
            "#,
        )
        .expect("cost override should parse");
        assert_eq!(config.costs.cost(ActionKind::MissileStrike), 10);
        assert_eq!(config.costs.cost(ActionKind::Airstrike), 4);
    }

    #[test]
    fn test_rejects_starting_points_above_cap() {
        let mut config = EngineConfig::default();
        config.war.starting_action_points = 20;
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_single_participant_war() {
        let result = EngineConfig::from_toml_str("[war]\nmin_participants = 1\n");
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = EngineConfig::from_toml_str("[war\nmax_turns = ");
        assert!(matches!(result, Err(EngineError::Toml(_))));
    }

    #[test]
    fn test_shipped_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/engine.toml");
        let config = EngineConfig::load(path).expect("data/engine.toml should load");
        assert_eq!(config, EngineConfig::default());
    }
}
