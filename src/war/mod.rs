//! Wars, their participants, and the tasks that own them

pub mod actor;
pub mod combatant;
pub mod control;
pub mod history;
pub mod lifecycle;

pub use actor::{spawn_war, WarHandle, WarRegistry};
pub use combatant::{Combatant, Units};
pub use control::{ControlDelta, ControlFlag, SpaceControl};
pub use history::{ActionRequest, BattleAction};
pub use lifecycle::{CompletionReason, TurnAdvance, War, WarState};
