//! Headless runner: loads a settings document and a scenario, drives the
//! frame loop the way the host engine would, and prints a JSON summary.
//!
//! ```text
//! haloswarm-harness <settings.json> <scenario.json>
//! ```
//!
//! Set `RUST_LOG=haloswarm_core=debug` to see strikes, contact hits and
//! level-ups as they happen.

mod scenario;

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use glam::Vec3;
use haloswarm_core::event::Event;
use haloswarm_core::game::{FrameOutcome, Game};
use haloswarm_core::pause::Pauser;
use haloswarm_core::systems::EnemyId;
use haloswarm_core::GameSettings;
use serde::Serialize;
use tracing::{info, warn};

use scenario::{Action, Scenario};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn read_json(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

/// End-of-session totals.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    frames_run: u64,
    frames_paused: u64,
    strikes: u64,
    damage_taken: f32,
    healed: f32,
    level: usize,
    gold: u32,
    hp: f32,
    max_hp: f32,
    position: Vec3,
    died_on_frame: Option<u64>,
}

impl Summary {
    /// Folds events into the totals. Returns `true` if health ran out.
    fn record(&mut self, frame: u64, events: &[Event]) -> bool {
        let mut depleted = false;
        for event in events {
            match event {
                Event::Damaged { amount, .. } => self.damage_taken += amount,
                Event::Healed { amount } => self.healed += amount,
                Event::LevelUp { level } => info!(frame, level, "level up"),
                Event::Depleted => depleted = true,
                Event::Strike { .. } => {}
            }
        }
        if depleted {
            warn!(frame, "player died");
            self.died_on_frame = Some(frame);
        }
        depleted
    }
}

fn apply(game: &mut Game, pauser: &mut Pauser, action: &Action) -> Result<Vec<Event>> {
    let events = match action {
        Action::Damage { amount } => game.unit_mut().apply_damage(*amount),
        Action::Experience { amount } => game.unit_mut().add_experience(*amount),
        Action::Gold { amount } => {
            game.unit_mut().collect_gold(*amount);
            vec![]
        }
        Action::BeginContact { enemy, damage } => {
            game.contacts_mut().begin_contact(EnemyId::new(*enemy), *damage);
            vec![]
        }
        Action::EndContact { enemy } => {
            game.contacts_mut().end_contact(EnemyId::new(*enemy));
            vec![]
        }
        Action::Pause => {
            pauser.pause();
            vec![]
        }
        Action::Resume => {
            pauser.resume();
            vec![]
        }
        Action::Upgrade { upgrade } => {
            game.unit_mut()
                .apply_upgrade(*upgrade)
                .with_context(|| format!("apply upgrade {upgrade}"))?;
            vec![]
        }
    };
    Ok(events)
}

fn run(settings: &GameSettings, scenario: &Scenario) -> Result<Summary> {
    if !scenario.dt.is_finite() || scenario.dt <= 0.0 {
        bail!("scenario dt must be positive, got {}", scenario.dt);
    }

    let mut game = Game::new(settings, scenario.input.build()).context("build game")?;
    let mut pauser = Pauser::new();
    let mut summary = Summary::default();

    for frame in 0..scenario.frames {
        for timed in scenario.actions.iter().filter(|a| a.frame == frame) {
            let events = apply(&mut game, &mut pauser, &timed.action)
                .with_context(|| format!("action at frame {frame}"))?;
            if summary.record(frame, &events) && scenario.stop_on_death {
                game.unit_mut().terminate();
            }
        }

        let report = game.frame(&pauser, scenario.dt);
        match report.outcome {
            FrameOutcome::Ran => summary.frames_run += 1,
            FrameOutcome::Paused | FrameOutcome::Skipped => summary.frames_paused += 1,
            FrameOutcome::Terminal => break,
        }

        if summary.record(frame, &report.events) && scenario.stop_on_death {
            game.unit_mut().terminate();
        }
    }

    let unit = game.unit();
    summary.strikes = game.strikes().strikes();
    summary.level = unit.level().level();
    summary.gold = unit.gold();
    summary.hp = unit.health().current();
    summary.max_hp = unit.health().max();
    summary.position = unit.position();
    Ok(summary)
}

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: haloswarm-harness <settings.json> <scenario.json>");
        std::process::exit(2);
    }

    let settings = GameSettings::from_json(&read_json(Path::new(&args[1]))?)
        .with_context(|| format!("load settings {}", args[1]))?;
    let scenario: Scenario = serde_json::from_str(&read_json(Path::new(&args[2]))?)
        .with_context(|| format!("parse scenario {}", args[2]))?;
    info!(
        frames = scenario.frames,
        dt = scenario.dt,
        actions = scenario.actions.len(),
        "scenario loaded"
    );

    let summary = run(&settings, &scenario)?;
    info!(
        frames_run = summary.frames_run,
        level = summary.level,
        hp = summary.hp,
        "session finished"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
