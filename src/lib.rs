//! War Engine - turn-based nation-vs-nation combat
//!
//! Wars between nations are fought with ground, air and naval battles plus
//! missile and nuclear strikes. Every action is paid for in action points and
//! resolved by a three-sample roll contest. `combat` is pure math over
//! snapshots. `war` owns state, turns and completion.

pub mod actions;
pub mod combat;
pub mod core;
pub mod war;
