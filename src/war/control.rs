//! Space control: four persistent advantages per combatant
//!
//! Flags change only through a [`ControlDelta`] carried by a battle outcome
//! (or the fortify action). Ground control, air superiority and blockade are
//! contested: granting one to the attacker revokes it from the defender in
//! the same outcome. Fortified belongs to a single combatant and is exempt.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlFlag {
    GroundControl,
    AirSuperiority,
    Blockade,
    Fortified,
}

impl ControlFlag {
    pub const ALL: [ControlFlag; 4] = [
        ControlFlag::GroundControl,
        ControlFlag::AirSuperiority,
        ControlFlag::Blockade,
        ControlFlag::Fortified,
    ];

    /// Whether only one side of a pairing may hold this flag
    pub fn is_contested(self) -> bool {
        !matches!(self, ControlFlag::Fortified)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceControl {
    pub ground_control: bool,
    pub air_superiority: bool,
    pub blockade: bool,
    pub fortified: bool,
}

impl SpaceControl {
    pub fn get(&self, flag: ControlFlag) -> bool {
        match flag {
            ControlFlag::GroundControl => self.ground_control,
            ControlFlag::AirSuperiority => self.air_superiority,
            ControlFlag::Blockade => self.blockade,
            ControlFlag::Fortified => self.fortified,
        }
    }

    pub fn set(&mut self, flag: ControlFlag, value: bool) {
        match flag {
            ControlFlag::GroundControl => self.ground_control = value,
            ControlFlag::AirSuperiority => self.air_superiority = value,
            ControlFlag::Blockade => self.blockade = value,
            ControlFlag::Fortified => self.fortified = value,
        }
    }

    pub fn apply(&mut self, delta: &ControlDelta) {
        for flag in ControlFlag::ALL {
            if let Some(value) = delta.get(flag) {
                self.set(flag, value);
            }
        }
    }
}

/// Flag changes for one combatant; `None` leaves a flag as it is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_control: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_superiority: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockade: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fortified: Option<bool>,
}

impl ControlDelta {
    pub fn grant(flag: ControlFlag) -> Self {
        Self::default().with(flag, true)
    }

    pub fn revoke(flag: ControlFlag) -> Self {
        Self::default().with(flag, false)
    }

    pub fn with(mut self, flag: ControlFlag, value: bool) -> Self {
        let slot = match flag {
            ControlFlag::GroundControl => &mut self.ground_control,
            ControlFlag::AirSuperiority => &mut self.air_superiority,
            ControlFlag::Blockade => &mut self.blockade,
            ControlFlag::Fortified => &mut self.fortified,
        };
        *slot = Some(value);
        self
    }

    pub fn get(&self, flag: ControlFlag) -> Option<bool> {
        match flag {
            ControlFlag::GroundControl => self.ground_control,
            ControlFlag::AirSuperiority => self.air_superiority,
            ControlFlag::Blockade => self.blockade,
            ControlFlag::Fortified => self.fortified,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Revoke from the defender every contested flag granted to the attacker
pub fn enforce_exclusivity(attacker: &ControlDelta, defender: &mut ControlDelta) {
    for flag in ControlFlag::ALL {
        if flag.is_contested() && attacker.get(flag) == Some(true) {
            *defender = defender.with(flag, false);
        }
    }
}
