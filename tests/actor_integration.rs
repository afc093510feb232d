//! War task integration tests
//!
//! Many wars running as tokio tasks at once, driven only through handles.

use chrono::{Duration, TimeZone, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use war_engine::actions::Action;
use war_engine::core::types::Timestamp;
use war_engine::core::{ActionError, EngineConfig, EngineError};
use war_engine::war::{spawn_war, ActionRequest, Combatant, Units, War, WarRegistry, WarState};

fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap()
}

fn nation(name: &str) -> Combatant {
    Combatant::new(name).with_units(Units {
        soldiers: 8_000,
        tanks: 200,
        aircraft: 60,
        ships: 10,
        missiles: 1,
        nukes: 0,
    })
}

#[tokio::test]
async fn test_registry_runs_independent_wars() {
    let mut registry = WarRegistry::new();
    let mut handles = Vec::new();
    for seed in 0..4u64 {
        let war = War::new(EngineConfig::default(), t0());
        let handle = registry.spawn(war, ChaCha8Rng::seed_from_u64(seed));
        handle.join(nation("East"), t0()).await.unwrap();
        handle.join(nation("West"), t0()).await.unwrap();
        handles.push(handle);
    }
    assert_eq!(registry.len(), 4);

    // Only the first war sees any action
    let first = &handles[0];
    let war = first.snapshot().await.unwrap();
    let (a, b) = (war.participants[0].id, war.participants[1].id);
    let attack = Action::GroundAttack { soldiers: 4_000, tanks: 100 };
    first.submit(ActionRequest::against(a, b, attack), t0()).await.unwrap();

    let later = t0() + Duration::days(3);
    first.submit(ActionRequest::solo(a, Action::Hold), later).await.unwrap();

    let abandoned = registry.sweep_inactive(t0() + Duration::days(6)).await;
    assert_eq!(abandoned.len(), 3);
    assert!(!abandoned.contains(&first.id()));
    assert_eq!(first.snapshot().await.unwrap().state, WarState::Active);
}

#[tokio::test]
async fn test_tick_through_handle_regenerates() {
    let handle = spawn_war(War::new(EngineConfig::default(), t0()), ChaCha8Rng::seed_from_u64(1));
    let a = handle.join(nation("East"), t0()).await.unwrap();
    handle.join(nation("West"), t0()).await.unwrap();

    handle.submit(ActionRequest::solo(a, Action::Fortify), t0()).await.unwrap();
    let report = handle.tick(t0() + Duration::hours(4)).await.unwrap();

    assert_eq!(report.new_turn, 2);
    let east = report.updated_participants.iter().find(|c| c.id == a).unwrap();
    assert_eq!(east.action_points, 5);
}

#[tokio::test]
async fn test_unknown_actor_is_rejected() {
    let handle = spawn_war(War::new(EngineConfig::default(), t0()), ChaCha8Rng::seed_from_u64(2));
    handle.join(nation("East"), t0()).await.unwrap();
    handle.join(nation("West"), t0()).await.unwrap();

    let stranger = Combatant::new("Stranger").id;
    let err = handle
        .submit(ActionRequest::solo(stranger, Action::Hold), t0())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Action(ActionError::UnknownCombatant(id)) if id == stranger
    ));
}
