//! A nation's military identity inside one war

use serde::{Deserialize, Serialize};

use crate::actions::catalog::UnitKind;
use crate::combat::outcome::UnitLosses;
use crate::core::config::WarSettings;
use crate::core::types::CombatantId;
use crate::war::control::SpaceControl;

pub const MAX_RESISTANCE: u32 = 100;

/// Unit counts and missile stockpiles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Units {
    pub soldiers: u64,
    pub tanks: u64,
    pub aircraft: u64,
    pub ships: u64,
    #[serde(default)]
    pub missiles: u64,
    #[serde(default)]
    pub nukes: u64,
}

impl Units {
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

    fn subtract(&mut self, losses: &UnitLosses) {
        self.soldiers = self.soldiers.saturating_sub(losses.soldiers);
        self.tanks = self.tanks.saturating_sub(losses.tanks);
        self.aircraft = self.aircraft.saturating_sub(losses.aircraft);
        self.ships = self.ships.saturating_sub(losses.ships);
        self.missiles = self.missiles.saturating_sub(losses.missiles);
        self.nukes = self.nukes.saturating_sub(losses.nukes);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub units: Units,
    pub cities: u32,
    /// Infrastructure pool that infra damage draws down
    pub infrastructure: f64,
    /// Hit points, 0..=100; reaching 0 eliminates
    pub resistance: u32,
    pub action_points: u32,
    pub max_action_points: u32,
    pub control: SpaceControl,
    /// Soldiers fight at the munitions multiplier while this holds
    pub has_munitions: bool,
    pub host: bool,
    pub spectator: bool,
    pub eliminated: bool,
}

impl Combatant {
    pub fn new(name: impl Into<String>) -> Self {
        let settings = WarSettings::default();
        Self {
            id: CombatantId::new(),
            name: name.into(),
            units: Units::default(),
            cities: 1,
            infrastructure: 0.0,
            resistance: settings.starting_resistance,
            action_points: settings.starting_action_points,
            max_action_points: settings.max_action_points,
            control: SpaceControl::default(),
            has_munitions: true,
            host: false,
            spectator: false,
            eliminated: false,
        }
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    pub fn with_infrastructure(mut self, cities: u32, infrastructure: f64) -> Self {
        self.cities = cities;
        self.infrastructure = infrastructure.max(0.0);
        self
    }

    pub fn as_spectator(mut self) -> Self {
        self.spectator = true;
        self
    }

    /// Reset resistance and action points to a war's starting allotment
    pub fn enlist(&mut self, settings: &WarSettings) {
        self.resistance = settings.starting_resistance.min(MAX_RESISTANCE);
        self.max_action_points = settings.max_action_points;
        self.action_points = settings.starting_action_points.min(settings.max_action_points);
        self.eliminated = false;
    }

    /// Can act, be targeted, and regenerate
    pub fn is_active(&self) -> bool {
        !self.eliminated && !self.spectator
    }

    pub fn apply_losses(&mut self, losses: &UnitLosses) {
        self.units.subtract(losses);
    }

    /// Apply a signed resistance change, clamped to `0..=100`
    ///
    /// Returns true when this change eliminated the combatant.
    pub fn apply_resistance(&mut self, delta: i32) -> bool {
        let next = (i64::from(self.resistance) + i64::from(delta))
            .clamp(0, i64::from(MAX_RESISTANCE));
        self.resistance = next as u32;
        if self.resistance == 0 && !self.eliminated {
            self.eliminated = true;
            return true;
        }
        false
    }

    pub fn apply_infrastructure_damage(&mut self, damage: f64) {
        if damage.is_finite() && damage > 0.0 {
            self.infrastructure = (self.infrastructure - damage).max(0.0);
        }
    }

    /// Combatant invariants hold: resistance in range, points under cap,
    /// infrastructure a finite non-negative amount
    pub fn is_consistent(&self) -> bool {
        self.resistance <= MAX_RESISTANCE
            && self.action_points <= self.max_action_points
            && self.infrastructure.is_finite()
            && self.infrastructure >= 0.0
            && (self.resistance > 0 || self.eliminated)
    }
}
