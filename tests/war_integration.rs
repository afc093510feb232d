//! War lifecycle integration tests
//!
//! Full wars driven through the public API: joining, paying for actions,
//! turn advance, and every way a war can end.

use chrono::{Duration, TimeZone, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use war_engine::actions::{Action, ActionKind, AirTarget};
use war_engine::combat::ScriptedRolls;
use war_engine::core::types::Timestamp;
use war_engine::core::{ActionError, EngineConfig};
use war_engine::war::{ActionRequest, Combatant, CompletionReason, Units, War, WarState};

fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

fn army() -> Units {
    Units { soldiers: 30_000, tanks: 1_000, aircraft: 300, ships: 60, missiles: 4, nukes: 1 }
}

fn two_nation_war(config: EngineConfig) -> War {
    let mut war = War::new(config, t0());
    war.join(Combatant::new("North").with_units(army()).with_infrastructure(10, 5_000.0), t0())
        .unwrap();
    war.join(Combatant::new("South").with_units(army()).with_infrastructure(10, 5_000.0), t0())
        .unwrap();
    war
}

#[test]
fn test_action_point_exhaustion_example() {
    let mut war = two_nation_war(EngineConfig::default());
    let (a, b) = (war.participants[0].id, war.participants[1].id);
    war.participants[0].action_points = 2;

    let request = ActionRequest::against(a, b, Action::GroundAttack { soldiers: 1_000, tanks: 10 });
    let err = war.submit(&request, &mut ScriptedRolls::attacker_sweeps(), t0()).unwrap_err();

    assert_eq!(
        err,
        ActionError::InsufficientActionPoints {
            kind: ActionKind::GroundAttack,
            required: 3,
            available: 2,
        }
    );
    assert_eq!(war.participants[0].action_points, 2);
    assert_eq!(war.participants[1].resistance, 100);
    assert!(war.history.is_empty());
}

#[test]
fn test_expiry_at_max_turns_has_no_winner() {
    let mut war = two_nation_war(EngineConfig::default());
    let report = war.advance_turns(60);

    assert_eq!(report.new_turn, 60);
    assert_eq!(
        war.state,
        WarState::Completed { reason: CompletionReason::Expiry, winner: None }
    );
    assert_eq!(report.war_ended, Some(war.state));
    assert!(war.participants.iter().all(|c| c.resistance > 0));
}

#[test]
fn test_shorter_war_from_toml() {
    let config = EngineConfig::from_toml_str("[war]\nmax_turns = 5\n").unwrap();
    let mut war = two_nation_war(config);
    war.advance_turns(4);
    assert!(war.is_active());
    war.advance_turns(1);
    assert!(war.is_completed());
    assert_eq!(war.turn, 5);
}

#[test]
fn test_strikes_eliminate_and_crown_the_survivor() {
    let mut war = two_nation_war(EngineConfig::default());
    let (a, b) = (war.participants[0].id, war.participants[1].id);
    war.participants[0].action_points = 12;
    war.participants[1].resistance = 20;

    let mut rng = ScriptedRolls::new([0.5]);
    war.submit(&ActionRequest::against(a, b, Action::NuclearStrike), &mut rng, t0())
        .unwrap();

    let south = war.participant(b).unwrap();
    assert_eq!(south.resistance, 0);
    assert!(south.eliminated);
    assert_eq!(war.participant(a).unwrap().units.nukes, 0);
    assert_eq!(
        war.state,
        WarState::Completed { reason: CompletionReason::Elimination, winner: Some(a) }
    );

    let after = ActionRequest::against(a, b, Action::MissileStrike);
    assert_eq!(war.validate(&after), Err(ActionError::WarNotActive));
}

#[test]
fn test_three_way_war_ends_on_last_survivor() {
    let mut config = EngineConfig::default();
    config.war.min_participants = 3;
    let mut war = War::new(config, t0());
    let a = war.join(Combatant::new("North").with_units(army()), t0()).unwrap();
    let b = war.join(Combatant::new("South").with_units(army()), t0()).unwrap();
    assert_eq!(war.state, WarState::Waiting);
    let c = war.join(Combatant::new("West").with_units(army()), t0()).unwrap();
    assert_eq!(war.state, WarState::Active);

    war.participants[0].action_points = 12;
    war.participants[1].resistance = 10;
    war.participants[2].resistance = 10;
    let mut rng = ScriptedRolls::new([0.5]);

    war.submit(&ActionRequest::against(a, b, Action::MissileStrike), &mut rng, t0())
        .unwrap();
    assert!(war.participant(b).unwrap().eliminated);
    assert_eq!(war.state, WarState::Active);
    assert_eq!(war.remaining().count(), 2);

    let again = ActionRequest::against(a, b, Action::MissileStrike);
    assert_eq!(war.validate(&again), Err(ActionError::CombatantNotEligible(b)));

    war.participants[0].action_points = 12;
    war.submit(&ActionRequest::against(a, c, Action::MissileStrike), &mut rng, t0())
        .unwrap();
    assert_eq!(
        war.state,
        WarState::Completed { reason: CompletionReason::Elimination, winner: Some(a) }
    );
}

#[test]
fn test_control_flags_land_on_combatants() {
    let mut war = two_nation_war(EngineConfig::default());
    let (a, b) = (war.participants[0].id, war.participants[1].id);
    war.participants[1].control.air_superiority = true;

    let dogfight = Action::Airstrike { aircraft: 300, target: AirTarget::Aircraft };
    let strike = ActionRequest::against(a, b, dogfight);
    war.submit(&strike, &mut ScriptedRolls::attacker_sweeps(), t0()).unwrap();

    assert!(war.participant(a).unwrap().control.air_superiority);
    assert!(!war.participant(b).unwrap().control.air_superiority);
}

#[test]
fn test_turns_regenerate_up_to_cap() {
    let mut war = two_nation_war(EngineConfig::default());
    let a = war.participants[0].id;
    war.submit(&ActionRequest::solo(a, Action::Fortify), &mut ScriptedRolls::new([0.5]), t0())
        .unwrap();
    assert_eq!(war.participant(a).unwrap().action_points, 3);

    let report = war.advance_turns(2);
    let north = report.updated_participants.iter().find(|c| c.id == a).unwrap();
    assert_eq!(north.action_points, 5);

    let report = war.advance_turns(30);
    assert!(report.updated_participants.iter().all(|c| c.action_points == 12));
}

#[test]
fn test_wall_clock_tick_and_idle_abandonment() {
    let mut war = two_nation_war(EngineConfig::default());
    let report = war.tick(t0() + Duration::hours(6));
    assert_eq!(report.new_turn, 3);

    assert!(!war.abandon_if_idle(t0() + Duration::days(2)));
    assert!(war.abandon_if_idle(t0() + Duration::days(5)));
    assert_eq!(
        war.state,
        WarState::Completed { reason: CompletionReason::Abandoned, winner: None }
    );
}

#[test]
fn test_seeded_war_keeps_invariants() {
    let mut war = two_nation_war(EngineConfig::default());
    let (a, b) = (war.participants[0].id, war.participants[1].id);
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let plan = [
        Action::GroundAttack { soldiers: 10_000, tanks: 300 },
        Action::Airstrike { aircraft: 100, target: AirTarget::Soldiers },
        Action::Fortify,
    ];

    let mut turn_guard = 0;
    while war.is_active() && turn_guard < 100 {
        for (actor, target) in [(a, b), (b, a)] {
            for action in plan {
                let request = match action {
                    Action::Fortify => ActionRequest::solo(actor, action),
                    _ => ActionRequest::against(actor, target, action),
                };
                let _ = war.submit(&request, &mut rng, t0());
            }
        }
        war.advance_turns(1);
        turn_guard += 1;
    }

    assert!(war.is_completed());
    assert!(war.participants.iter().all(Combatant::is_consistent));
    assert!(war.history.windows(2).all(|w| w[0].turn <= w[1].turn));
    assert!(war.history.iter().all(|entry| entry.war_id == war.id));
}
