pub mod catalog;
pub mod points;

pub use catalog::{Action, ActionCategory, ActionKind, AirTarget, NavalTarget, UnitKind};
pub use points::{apply_cost, can_afford, regenerate, ActionCosts};
