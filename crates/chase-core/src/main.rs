//! Faction Chase headless runner
//!
//! Drives the simulation with a simple evasive autopilot, optionally logging
//! events to JSONL and writing the final world snapshot as JSON.

use chase_core::events::EventLogger;
use chase_core::output::write_snapshot;
use chase_core::{default_config_toml, LevelLayout, SimConfig, SimError, Simulation, Vec2};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::prelude::*;

/// Command line arguments for the runner
#[derive(Parser, Debug)]
#[command(name = "faction_chase")]
#[command(about = "Headless faction chase simulation")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Maximum number of ticks to simulate
    #[arg(long, default_value_t = 3000)]
    ticks: u64,

    /// Seconds per tick
    #[arg(long, default_value_t = 0.02)]
    dt: f32,

    /// TOML tuning file; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// TOML level layout; the built-in arena is used when omitted
    #[arg(long)]
    level: Option<PathBuf>,

    /// Write events to this JSONL file
    #[arg(long)]
    events: Option<PathBuf>,

    /// Write the final snapshot to this JSON file
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> ExitCode {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if args.print_default_config {
        print!("{}", default_config_toml());
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error(transparent)]
    Config(#[from] chase_core::ConfigError),
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

fn run(args: &Args) -> Result<(), RunError> {
    let config = match &args.config {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    let layout = match &args.level {
        Some(path) => LevelLayout::from_file(path)?,
        None => LevelLayout::default_arena(),
    };

    let mut logger = match &args.events {
        Some(path) => EventLogger::new(path)?,
        None => EventLogger::null(),
    };

    let mut sim = Simulation::new(config, layout, args.seed)?;
    info!(
        seed = args.seed,
        ticks = args.ticks,
        dt = args.dt,
        hunters = sim.hunters().len(),
        "starting run"
    );

    for _ in 0..args.ticks {
        let input = autopilot(&sim);
        sim.set_movement_input(input);
        let report = sim.tick(args.dt);
        logger.log_batch(&report.events)?;
        if let Some(reason) = report.outcome {
            info!(tick = report.tick, %reason, "session ended");
            break;
        }
    }
    logger.flush()?;

    let snapshot = sim.snapshot();
    info!(
        tick = snapshot.timestamp.tick,
        elapsed = snapshot.timestamp.elapsed,
        progress_a = snapshot.progress.progress_a,
        progress_b = snapshot.progress.progress_b,
        events = logger.event_count(),
        "run finished"
    );
    if let Some(path) = &args.snapshot {
        write_snapshot(path, &snapshot)?;
        info!(path = %path.display(), "snapshot written");
    }
    Ok(())
}

/// Flees the nearest rival hunter in range, otherwise drifts back to spawn.
fn autopilot(sim: &Simulation) -> Vec2 {
    let Some(player) = sim.player() else {
        return Vec2::ZERO;
    };
    let flee_range = sim.config().hunter.detection_range * sim.config().hunter.lose_sight_factor;

    let threat = sim
        .hunters()
        .into_iter()
        .filter(|h| h.faction != player.current_faction)
        .map(|h| (h.position, h.position.distance(player.position)))
        .filter(|&(_, distance)| distance < flee_range)
        .min_by(|a, b| a.1.total_cmp(&b.1));

    match threat {
        Some((hunter, _)) => (player.position - hunter).normalize_or_zero(),
        None => (sim.layout().player_spawn - player.position).normalize_or_zero(),
    }
}
