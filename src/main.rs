//! Bubble Arena entry point
//!
//! Headless runner: builds a simulation from settings, ticks it at the
//! frame rate (or as fast as possible) and logs the population as it grows.
//! Drawing the bubbles is left to whatever consumes `particles()`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;

use bubble_arena::consts::TICK_RATE;
use bubble_arena::sim::Particle;
use bubble_arena::{ConfigError, PopulationManager, Settings, SimEvent, Variant};

/// Command-line arguments for a headless simulation run.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// JSON settings file; built-in defaults are used when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Spawning rules to apply on top of the settings (open or lineage).
    #[arg(long, value_parser = parse_variant)]
    variant: Option<Variant>,
    /// Number of ticks to simulate.
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,
    /// RNG seed; overrides the settings file.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Pace ticks at the frame rate instead of running flat out.
    #[arg(long)]
    realtime: bool,
    /// Write the final particle snapshot as JSON.
    #[arg(long, value_name = "FILE")]
    dump: Option<PathBuf>,
}

fn parse_variant(s: &str) -> Result<Variant, String> {
    Variant::from_str(s).ok_or_else(|| format!("unknown variant '{}' (expected open or lineage)", s))
}

/// Runner holding the simulation and frame pacing state
struct Runner {
    manager: PopulationManager,
    frame: Duration,
    realtime: bool,
}

impl Runner {
    fn new(manager: PopulationManager, realtime: bool) -> Self {
        Self {
            manager,
            frame: Duration::from_secs(1) / TICK_RATE,
            realtime,
        }
    }

    fn run(&mut self, ticks: u64) {
        let mut next_frame = Instant::now();
        for _ in 0..ticks {
            self.manager.tick();
            self.report_events();

            if self.realtime {
                next_frame += self.frame;
                if let Some(wait) = next_frame.checked_duration_since(Instant::now()) {
                    std::thread::sleep(wait);
                }
            }
        }
    }

    fn report_events(&self) {
        let spawned = self
            .manager
            .events()
            .iter()
            .filter(|e| matches!(e, SimEvent::Spawned { .. }))
            .count();
        if spawned > 0 {
            log::info!(
                "Tick {}: {} spawned, population {}",
                self.manager.stats().ticks,
                spawned,
                self.manager.len()
            );
        }
    }

    fn dump(&self, path: &Path) -> Result<(), ConfigError> {
        let particles: &[Particle] = self.manager.particles();
        let json = serde_json::to_string_pretty(particles)?;
        std::fs::write(path, json)?;
        log::info!("Wrote {} particles to {}", particles.len(), path.display());
        Ok(())
    }
}

fn build_settings(args: &CliArgs) -> Result<Settings, ConfigError> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(variant) = args.variant {
        settings.apply_variant(variant);
    }
    if let Some(seed) = args.seed {
        settings.rng_seed = seed;
    }
    Ok(settings)
}

fn run(args: CliArgs) -> Result<(), ConfigError> {
    let settings = build_settings(&args)?;
    let manager = PopulationManager::initialize(settings)?;

    let mut runner = Runner::new(manager, args.realtime);
    runner.run(args.ticks);

    let stats = runner.manager.stats();
    log::info!(
        "Finished {} ticks: population {}, {} spawned, {} wall contacts, saturated at {:?}",
        stats.ticks,
        runner.manager.len(),
        stats.spawned,
        stats.wall_contacts,
        stats.saturated_at
    );

    if let Some(path) = &args.dump {
        runner.dump(path)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Bubble Arena (headless) starting...");

    match run(CliArgs::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
