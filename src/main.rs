//! Headless War Runner
//!
//! Plays seeded AI-vs-AI wars to completion and prints a summary. Each AI
//! spends its points greedily on the most expensive action it can afford.

use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use war_engine::actions::{Action, AirTarget, NavalTarget};
use war_engine::combat::FormulaSet;
use war_engine::core::types::CombatantId;
use war_engine::core::{EngineConfig, Result};
use war_engine::war::{ActionRequest, Combatant, CompletionReason, Units, War, WarState};

/// Headless War Runner - AI vs AI wars for balance checks
#[derive(Parser, Debug)]
#[command(name = "war-engine")]
#[command(about = "Run seeded AI vs AI wars and print the results")]
struct Args {
    /// Engine config (TOML); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of wars to play
    #[arg(long, default_value_t = 1)]
    wars: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Use the legacy formula constants instead of v2
    #[arg(long)]
    legacy: bool,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Log every action at debug level
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct WarSummary {
    index: u32,
    war_id: String,
    outcome: String,
    winner: Option<String>,
    turns: u32,
    actions: usize,
    red_resistance: u32,
    blue_resistance: u32,
}

#[derive(Debug, Serialize)]
struct RunReport {
    seed: u64,
    formulas: FormulaSet,
    red_wins: usize,
    blue_wins: usize,
    undecided: usize,
    wars: Vec<WarSummary>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "war_engine=debug" } else { "war_engine=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if args.legacy {
        config.formulas = FormulaSet::Legacy;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, wars = args.wars, formulas = ?config.formulas, "Starting run");

    let wars = (0..args.wars)
        .into_par_iter()
        .map(|index| play_war(index, seed, &config))
        .collect::<Result<Vec<_>>>()?;

    let count = |name: &str| wars.iter().filter(|w| w.winner.as_deref() == Some(name)).count();
    let report = RunReport {
        seed,
        formulas: config.formulas,
        red_wins: count("Red"),
        blue_wins: count("Blue"),
        undecided: wars.iter().filter(|w| w.winner.is_none()).count(),
        wars,
    };

    match args.format.as_str() {
        "text" => print_text(&report),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        other => {
            eprintln!("Unknown format '{}', defaulting to json", other);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn print_text(report: &RunReport) {
    println!("War Results");
    println!("===========");
    for war in &report.wars {
        println!(
            "#{:<3} {:<12} winner={:<5} turns={:<3} actions={:<4} resistance {}/{}",
            war.index,
            war.outcome,
            war.winner.as_deref().unwrap_or("-"),
            war.turns,
            war.actions,
            war.red_resistance,
            war.blue_resistance,
        );
    }
    println!();
    println!(
        "Red {} / Blue {} / undecided {}",
        report.red_wins, report.blue_wins, report.undecided
    );
    println!("Formulas: {:?}", report.formulas);
    println!("Seed: {}", report.seed);
}

/// Play one war between two random nations until it completes
fn play_war(index: u32, seed: u64, config: &EngineConfig) -> Result<WarSummary> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(u64::from(index)));
    let now = Utc::now();

    let mut war = War::new(config.clone(), now);
    let red = war.join(random_nation("Red", &mut rng), now)?;
    let blue = war.join(random_nation("Blue", &mut rng), now)?;

    while !war.is_completed() {
        for (actor, target) in [(red, blue), (blue, red)] {
            while let Some(request) = choose_action(&war, actor, target) {
                if let Err(err) = war.submit(&request, &mut rng, now) {
                    tracing::debug!(%err, "Policy picked an action that was rejected");
                    break;
                }
            }
            if war.is_completed() {
                break;
            }
        }
        war.advance_turns(1);
    }

    let outcome = match war.state {
        WarState::Completed { reason: CompletionReason::Elimination, .. } => "elimination",
        WarState::Completed { reason: CompletionReason::Expiry, .. } => "expiry",
        WarState::Completed { reason: CompletionReason::Abandoned, .. } => "abandoned",
        WarState::Waiting | WarState::Active => "unfinished",
    };
    let resistance = |id| war.participant(id).map_or(0, |c| c.resistance);

    Ok(WarSummary {
        index,
        war_id: war.id.to_string(),
        outcome: outcome.to_string(),
        winner: war.winner().and_then(|id| war.participant(id)).map(|c| c.name.clone()),
        turns: war.turn,
        actions: war.history.len(),
        red_resistance: resistance(red),
        blue_resistance: resistance(blue),
    })
}

fn random_nation(name: &str, rng: &mut ChaCha8Rng) -> Combatant {
    let units = Units {
        soldiers: rng.gen_range(20_000..=120_000),
        tanks: rng.gen_range(500..=4_000),
        aircraft: rng.gen_range(100..=900),
        ships: rng.gen_range(20..=150),
        missiles: rng.gen_range(0..=3),
        nukes: rng.gen_range(0..=1),
    };
    let cities = rng.gen_range(5..=30);
    Combatant::new(name)
        .with_units(units)
        .with_infrastructure(cities, f64::from(cities) * 1_000.0)
}

/// Most expensive action the actor can currently afford, if any
///
/// Hold is never picked since it costs nothing and would never end the turn.
fn choose_action(war: &War, actor: CombatantId, target: CombatantId) -> Option<ActionRequest> {
    let me = war.participant(actor)?;
    let them = war.participant(target)?;

    let air_target = if them.units.aircraft > 0 { AirTarget::Aircraft } else { AirTarget::Tanks };
    let naval_target =
        if them.units.ships > 0 { NavalTarget::Ships } else { NavalTarget::Infrastructure };

    let mut candidates = vec![
        ActionRequest::against(actor, target, Action::NuclearStrike),
        ActionRequest::against(actor, target, Action::MissileStrike),
        ActionRequest::against(
            actor,
            target,
            Action::NavalAttack { ships: me.units.ships, target: naval_target },
        ),
        ActionRequest::against(
            actor,
            target,
            Action::Airstrike { aircraft: me.units.aircraft, target: air_target },
        ),
        ActionRequest::against(
            actor,
            target,
            Action::GroundAttack { soldiers: me.units.soldiers, tanks: me.units.tanks },
        ),
    ];
    if !me.control.fortified {
        candidates.push(ActionRequest::solo(actor, Action::Fortify));
    }

    candidates
        .into_iter()
        .filter(|request| war.validate(request).is_ok())
        .max_by_key(|request| war.config.costs.cost(request.action.kind()))
}
