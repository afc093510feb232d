pub mod air;
pub mod constants;
pub mod ground;
pub mod naval;
pub mod outcome;
pub mod random;
pub mod resolution;
pub mod roll;
pub mod strike;

pub use constants::{FormulaConstants, FormulaSet};
pub use outcome::{BattleOutcome, UnitLosses};
pub use random::{RandomSource, ScriptedRolls};
pub use resolution::{check, resolve};
pub use roll::{RollOutcome, VictoryTier};
