//! War state machine
//!
//! ```text
//! Waiting --(enough participants)--> Active --(elimination | expiry | inactivity)--> Completed
//!                                      ^  |
//!                                      +--+ turn advance (regenerates action points)
//! ```
//!
//! `Completed` is terminal. All mutation of participants happens inside
//! `&mut self` methods, so whoever owns the `War` is its single writer.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::actions::points;
use crate::combat::random::RandomSource;
use crate::combat::resolution;
use crate::core::config::{EngineConfig, WarSettings};
use crate::core::error::{ActionError, EngineError, Result};
use crate::core::types::{CombatantId, Timestamp, Turn, WarId};
use crate::war::combatant::Combatant;
use crate::war::history::{ActionRequest, BattleAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    /// One fighter left standing (or none)
    Elimination,
    /// Turn limit reached
    Expiry,
    /// No actions within the inactivity window
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WarState {
    Waiting,
    Active,
    Completed {
        reason: CompletionReason,
        winner: Option<CombatantId>,
    },
}

/// Result of a turn advance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnAdvance {
    /// Participants after regeneration, active ones only
    pub updated_participants: Vec<Combatant>,
    pub new_turn: Turn,
    /// Set when this advance (or an earlier event) ended the war
    pub war_ended: Option<WarState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct War {
    pub id: WarId,
    pub config: EngineConfig,
    pub participants: Vec<Combatant>,
    pub turn: Turn,
    pub state: WarState,
    pub created_at: Timestamp,
    pub last_turn_at: Timestamp,
    pub last_action_at: Timestamp,
    pub history: Vec<BattleAction>,
}

impl War {
    pub fn new(config: EngineConfig, now: Timestamp) -> Self {
        Self {
            id: WarId::new(),
            config,
            participants: Vec::new(),
            turn: 0,
            state: WarState::Waiting,
            created_at: now,
            last_turn_at: now,
            last_action_at: now,
            history: Vec::new(),
        }
    }

    pub fn settings(&self) -> &WarSettings {
        &self.config.war
    }

    pub fn participant(&self, id: CombatantId) -> Option<&Combatant> {
        self.participants.iter().find(|c| c.id == id)
    }

    fn index_of(&self, id: CombatantId) -> std::result::Result<usize, ActionError> {
        self.participants
            .iter()
            .position(|c| c.id == id)
            .ok_or(ActionError::UnknownCombatant(id))
    }

    pub fn is_active(&self) -> bool {
        self.state == WarState::Active
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, WarState::Completed { .. })
    }

    pub fn winner(&self) -> Option<CombatantId> {
        match self.state {
            WarState::Completed { winner, .. } => winner,
            _ => None,
        }
    }

    /// Non-spectators still standing
    pub fn remaining(&self) -> impl Iterator<Item = &Combatant> {
        self.participants
            .iter()
            .filter(|c| c.is_active() && c.resistance > 0)
    }

    /// Add a participant with the war's starting allotment
    ///
    /// Fighters may only join while the war is waiting; spectators may also
    /// join an active war.
    pub fn join(&mut self, mut combatant: Combatant, now: Timestamp) -> Result<CombatantId> {
        match self.state {
            WarState::Completed { .. } => {
                return Err(EngineError::Join(format!("war {} has ended", self.id)));
            }
            WarState::Active if !combatant.spectator => {
                return Err(EngineError::Join(format!(
                    "war {} already started; only spectators may join",
                    self.id
                )));
            }
            _ => {}
        }
        if self.participant(combatant.id).is_some() {
            return Err(EngineError::Join(format!(
                "{} is already in war {}",
                combatant.id, self.id
            )));
        }

        combatant.enlist(&self.config.war);
        if self.participants.is_empty() {
            combatant.host = true;
        }
        let id = combatant.id;
        tracing::debug!(
            war = %self.id,
            combatant = %id,
            name = %combatant.name,
            "Combatant joined"
        );
        self.participants.push(combatant);

        self.try_activate(now);
        Ok(id)
    }

    fn try_activate(&mut self, now: Timestamp) {
        if self.state != WarState::Waiting {
            return;
        }
        let enough = self.participants.len() >= self.config.war.min_participants;
        let has_fighter = self.participants.iter().any(|c| !c.spectator);
        if enough && has_fighter {
            self.state = WarState::Active;
            self.last_turn_at = now;
            self.last_action_at = now;
            tracing::info!(war = %self.id, participants = self.participants.len(), "War active");
            self.evaluate_completion();
        }
    }

    /// Check an action request against the current state without changing it
    pub fn validate(&self, request: &ActionRequest) -> std::result::Result<(), ActionError> {
        if !self.is_active() {
            return Err(ActionError::WarNotActive);
        }
        let actor = &self.participants[self.index_of(request.actor)?];
        let target = match request.target {
            Some(id) => Some(&self.participants[self.index_of(id)?]),
            None => None,
        };

        resolution::check(&request.action, actor, target)?;

        let kind = request.action.kind();
        if !points::can_afford(actor, kind, &self.config.costs) {
            return Err(ActionError::InsufficientActionPoints {
                kind,
                required: self.config.costs.cost(kind),
                available: actor.action_points,
            });
        }
        Ok(())
    }

    /// Validate, resolve and apply one action
    ///
    /// Either the whole action lands (cost paid, deltas applied, log entry
    /// appended) or nothing changes.
    pub fn submit<R: RandomSource + ?Sized>(
        &mut self,
        request: &ActionRequest,
        rng: &mut R,
        now: Timestamp,
    ) -> std::result::Result<BattleAction, ActionError> {
        if let Err(err) = self.validate(request) {
            tracing::warn!(war = %self.id, actor = %request.actor, %err, "Action rejected");
            return Err(err);
        }

        let actor_idx = self.index_of(request.actor)?;
        let target_idx = request.target.map(|id| self.index_of(id)).transpose()?;

        let consts = self.config.constants();
        let outcome = {
            let actor = &self.participants[actor_idx];
            let target = target_idx.map(|i| &self.participants[i]);
            resolution::resolve(&request.action, actor, target, &consts, rng)?
        };

        let kind = request.action.kind();
        let actor = &mut self.participants[actor_idx];
        points::apply_cost(actor, kind, &self.config.costs)?;
        actor.apply_losses(&outcome.attacker_losses);
        actor.control.apply(&outcome.attacker_control);

        if let Some(i) = target_idx {
            let target = &mut self.participants[i];
            target.apply_losses(&outcome.defender_losses);
            target.apply_infrastructure_damage(outcome.infrastructure_damage);
            target.control.apply(&outcome.defender_control);
            if target.apply_resistance(outcome.resistance_damage) {
                tracing::info!(war = %self.id, combatant = %target.id, "Combatant eliminated");
            }
        }

        let record = BattleAction {
            id: Uuid::new_v4(),
            war_id: self.id,
            turn: self.turn,
            timestamp: now,
            actor: request.actor,
            target: request.target,
            action: request.action,
            action_points_spent: self.config.costs.cost(kind),
            outcome,
        };
        tracing::debug!(
            war = %self.id,
            turn = self.turn,
            action = %request.action,
            tier = ?outcome.tier(),
            resistance_damage = outcome.resistance_damage,
            "Action resolved"
        );

        self.history.push(record.clone());
        self.last_action_at = now;
        self.evaluate_completion();
        Ok(record)
    }

    /// Advance `intervals` turns, regenerating action points each turn
    ///
    /// Turns never pass the maximum; reaching it completes the war.
    pub fn advance_turns(&mut self, intervals: u32) -> TurnAdvance {
        if !self.is_active() || intervals == 0 {
            return self.turn_report();
        }

        let steps = intervals.min(self.config.war.max_turns.saturating_sub(self.turn));
        let regen = self.config.war.action_point_regen.saturating_mul(steps);
        for combatant in &mut self.participants {
            let cap = combatant.max_action_points;
            points::regenerate(combatant, regen, cap);
        }
        self.turn += steps;

        let shift = i32::try_from(steps)
            .ok()
            .and_then(|n| self.turn_length().checked_mul(n))
            .and_then(|d| self.last_turn_at.checked_add_signed(d));
        if let Some(next) = shift {
            self.last_turn_at = next;
        }

        tracing::debug!(war = %self.id, turn = self.turn, steps, "Turn advanced");
        self.evaluate_completion();
        self.turn_report()
    }

    /// Advance however many whole turns have elapsed since the last one
    pub fn tick(&mut self, now: Timestamp) -> TurnAdvance {
        let elapsed = (now - self.last_turn_at).num_seconds();
        let intervals = if elapsed <= 0 {
            0
        } else {
            let turn = self.turn_length().num_seconds().max(1);
            u32::try_from(elapsed / turn).unwrap_or(u32::MAX)
        };
        self.advance_turns(intervals)
    }

    /// Turn length on the wall clock, never shorter than a second
    fn turn_length(&self) -> Duration {
        Duration::from_std(self.config.war.turn_duration())
            .unwrap_or(Duration::MAX)
            .max(Duration::seconds(1))
    }

    fn turn_report(&self) -> TurnAdvance {
        TurnAdvance {
            updated_participants: self
                .participants
                .iter()
                .filter(|c| c.is_active())
                .cloned()
                .collect(),
            new_turn: self.turn,
            war_ended: self.is_completed().then_some(self.state),
        }
    }

    /// Complete the war if the turn limit is reached or one fighter remains
    pub fn evaluate_completion(&mut self) -> Option<WarState> {
        if !self.is_active() {
            return self.is_completed().then_some(self.state);
        }

        if self.turn >= self.config.war.max_turns {
            self.complete(CompletionReason::Expiry, None);
        } else {
            let remaining: Vec<CombatantId> = self.remaining().map(|c| c.id).collect();
            match remaining.as_slice() {
                [] => self.complete(CompletionReason::Elimination, None),
                [winner] => self.complete(CompletionReason::Elimination, Some(*winner)),
                _ => return None,
            }
        }
        Some(self.state)
    }

    /// Abandon an active war nobody has acted in for the inactivity window
    pub fn abandon_if_idle(&mut self, now: Timestamp) -> bool {
        if !self.is_active() {
            return false;
        }
        let idle = now - self.last_action_at;
        let window =
            Duration::from_std(self.config.war.inactivity_window()).unwrap_or(Duration::MAX);
        if idle >= window {
            tracing::warn!(
                war = %self.id,
                idle_secs = idle.num_seconds(),
                "War abandoned for inactivity"
            );
            self.complete(CompletionReason::Abandoned, None);
            return true;
        }
        false
    }

    fn complete(&mut self, reason: CompletionReason, winner: Option<CombatantId>) {
        self.state = WarState::Completed { reason, winner };
        tracing::info!(war = %self.id, ?reason, ?winner, turn = self.turn, "War completed");
    }

    pub fn history_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.history)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::catalog::Action;
    use crate::combat::random::ScriptedRolls;
    use crate::war::combatant::Units;
    use chrono::{TimeZone, Utc};

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    fn fighter(name: &str) -> Combatant {
        Combatant::new(name).with_units(Units {
            soldiers: 10_000,
            tanks: 500,
            aircraft: 200,
            ships: 50,
            missiles: 2,
            nukes: 1,
        })
    }

    fn active_war() -> (War, CombatantId, CombatantId) {
        let mut war = War::new(EngineConfig::default(), t0());
        let a = war.join(fighter("A"), t0()).unwrap();
        let b = war.join(fighter("B"), t0()).unwrap();
        (war, a, b)
    }

    #[test]
    fn test_waiting_until_min_participants() {
        let mut war = War::new(EngineConfig::default(), t0());
        war.join(fighter("A"), t0()).unwrap();
        assert_eq!(war.state, WarState::Waiting);
        war.join(fighter("B"), t0()).unwrap();
        assert_eq!(war.state, WarState::Active);
        assert!(war.participants[0].host);
    }

    #[test]
    fn test_spectators_alone_do_not_activate() {
        let mut war = War::new(EngineConfig::default(), t0());
        war.join(fighter("S1").as_spectator(), t0()).unwrap();
        war.join(fighter("S2").as_spectator(), t0()).unwrap();
        assert_eq!(war.state, WarState::Waiting);
    }

    #[test]
    fn test_lone_fighter_with_spectator_wins_on_activation() {
        let mut war = War::new(EngineConfig::default(), t0());
        let a = war.join(fighter("A"), t0()).unwrap();
        war.join(fighter("S").as_spectator(), t0()).unwrap();
        assert_eq!(
            war.state,
            WarState::Completed { reason: CompletionReason::Elimination, winner: Some(a) }
        );
        assert_eq!(war.turn, 0);
        assert!(war.history.is_empty());
    }

    #[test]
    fn test_fighters_cannot_join_active_war() {
        let (mut war, _, _) = active_war();
        assert!(matches!(war.join(fighter("C"), t0()), Err(EngineError::Join(_))));
        assert!(war.join(fighter("Watcher").as_spectator(), t0()).is_ok());
    }

    #[test]
    fn test_action_before_activation_rejected() {
        let mut war = War::new(EngineConfig::default(), t0());
        let a = war.join(fighter("A"), t0()).unwrap();
        let req = ActionRequest::solo(a, Action::Fortify);
        assert_eq!(war.validate(&req), Err(ActionError::WarNotActive));
    }

    #[test]
    fn test_submit_deducts_cost_once_and_logs() {
        let (mut war, a, b) = active_war();
        let req = ActionRequest::against(a, b, Action::GroundAttack { soldiers: 5000, tanks: 200 });
        let record = war.submit(&req, &mut ScriptedRolls::attacker_sweeps(), t0()).unwrap();

        assert_eq!(record.action_points_spent, 3);
        assert_eq!(war.participant(a).unwrap().action_points, 3);
        assert_eq!(war.participant(b).unwrap().resistance, 90);
        assert!(war.participant(a).unwrap().control.ground_control);
        assert_eq!(war.history.len(), 1);
    }

    #[test]
    fn test_rejected_submit_changes_nothing() {
        let (mut war, a, b) = active_war();
        war.participants[0].action_points = 2;
        let before = war.participants.clone();
        let req = ActionRequest::against(a, b, Action::GroundAttack { soldiers: 100, tanks: 0 });
        let err = war.submit(&req, &mut ScriptedRolls::attacker_sweeps(), t0()).unwrap_err();
        assert!(matches!(
            err,
            ActionError::InsufficientActionPoints { required: 3, available: 2, .. }
        ));
        assert_eq!(war.participants, before);
        assert!(war.history.is_empty());
    }

    #[test]
    fn test_unknown_target_rejected() {
        let (war, a, _) = active_war();
        let ghost = CombatantId::new();
        let req = ActionRequest::against(a, ghost, Action::MissileStrike);
        assert_eq!(war.validate(&req), Err(ActionError::UnknownCombatant(ghost)));
    }

    #[test]
    fn test_elimination_completes_with_winner() {
        let (mut war, a, b) = active_war();
        war.participants[0].action_points = 12;
        war.participants[1].resistance = 5;
        let req = ActionRequest::against(a, b, Action::MissileStrike);
        war.submit(&req, &mut ScriptedRolls::new([0.5]), t0()).unwrap();

        assert!(war.participant(b).unwrap().eliminated);
        assert_eq!(
            war.state,
            WarState::Completed { reason: CompletionReason::Elimination, winner: Some(a) }
        );
    }

    #[test]
    fn test_advance_regenerates_up_to_cap() {
        let (mut war, _, _) = active_war();
        let report = war.advance_turns(3);
        assert_eq!(report.new_turn, 3);
        assert!(report.updated_participants.iter().all(|c| c.action_points == 9));

        let report = war.advance_turns(20);
        assert!(report.updated_participants.iter().all(|c| c.action_points == 12));
        assert!(report.war_ended.is_none());
    }

    #[test]
    fn test_expiry_at_max_turns() {
        let (mut war, _, _) = active_war();
        war.advance_turns(59);
        assert!(war.is_active());
        let report = war.advance_turns(5);
        assert_eq!(report.new_turn, 60);
        assert_eq!(
            report.war_ended,
            Some(WarState::Completed { reason: CompletionReason::Expiry, winner: None })
        );
        // Terminal: further advances change nothing
        assert_eq!(war.advance_turns(1).new_turn, 60);
    }

    #[test]
    fn test_tick_uses_wall_clock() {
        let (mut war, _, _) = active_war();
        let later = t0() + Duration::seconds(7200 * 2 + 100);
        assert_eq!(war.tick(later).new_turn, 2);
        assert_eq!(war.last_turn_at, t0() + Duration::seconds(7200 * 2));
        assert_eq!(war.tick(later).new_turn, 2);
    }

    #[test]
    fn test_abandon_after_inactivity() {
        let (mut war, a, _) = active_war();
        let hold = ActionRequest::solo(a, Action::Hold);
        war.submit(&hold, &mut ScriptedRolls::new([0.5]), t0()).unwrap();
        assert!(!war.abandon_if_idle(t0() + Duration::days(4)));
        assert!(war.abandon_if_idle(t0() + Duration::days(5)));
        assert_eq!(
            war.state,
            WarState::Completed { reason: CompletionReason::Abandoned, winner: None }
        );
    }

    #[test]
    fn test_history_json_lists_actions() {
        let (mut war, a, _) = active_war();
        let fortify = ActionRequest::solo(a, Action::Fortify);
        war.submit(&fortify, &mut ScriptedRolls::new([0.5]), t0()).unwrap();
        let json = war.history_json().unwrap();
        assert!(json.contains("\"fortify\""));
    }
}
