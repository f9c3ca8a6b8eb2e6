//! highway: drive the multi-lane traffic simulation from the command line.
//!
//! ```text
//! highway run   [--ticks N] [--out DIR]      run to completion, optional CSV
//! highway serve [--host H] [--port 8585]     poll-and-step over HTTP
//! ```
//!
//! Both subcommands accept `--config FILE` (JSON `SimConfig`, missing fields
//! take their defaults) and `--seed N`.  Log verbosity follows `RUST_LOG`.

mod server;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hw_core::{SimConfig, Tick, VehicleId};
use hw_grid::Grid;
use hw_output::{CsvWriter, SimOutputObserver};
use hw_sim::{NoopObserver, SimObserver, Simulation, TickSummary};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "highway")]
#[command(about = "Grid-based multi-lane highway traffic simulation")]
#[command(version)]
struct Cli {
    /// JSON file with simulation settings
    #[arg(long, global = true, env = "HIGHWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the master RNG seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the simulation to the end and print a summary
    Run {
        /// Ticks to run (default: `total_ticks` from the config)
        #[arg(long)]
        ticks: Option<u64>,

        /// Write occupancy.csv and tick_summaries.csv into this directory
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Serve the per-vehicle export; every POST advances one tick
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        #[arg(long, env = "HIGHWAY_PORT", default_value_t = 8585)]
        port: u16,
    },
}

// ── Run summary ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Totals {
    ticks:        u64,
    spawned:      usize,
    exited:       usize,
    lane_changes: usize,
    peak_live:    usize,
    locked:       Option<VehicleId>,
}

/// Forwards every callback and keeps running totals for the final report.
struct Tally<O: SimObserver> {
    inner:  O,
    totals: Totals,
}

impl<O: SimObserver> Tally<O> {
    fn new(inner: O) -> Self {
        Self { inner, totals: Totals::default() }
    }
}

impl<O: SimObserver> SimObserver for Tally<O> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_occupancy(&mut self, tick: Tick, grid: &Grid) {
        self.inner.on_occupancy(tick, grid);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        let t = &mut self.totals;
        t.ticks += 1;
        t.spawned += summary.spawned.is_some() as usize;
        t.exited += summary.exited.len();
        t.lane_changes += summary.lane_changes;
        t.peak_live = t.peak_live.max(summary.live);
        if summary.spawned_locked {
            t.locked = summary.spawned;
        }
        self.inner.on_tick_end(summary);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    match cli.command {
        Command::Run { ticks, out } => {
            if let Some(ticks) = ticks {
                config.total_ticks = ticks;
            }
            run(config, out.as_deref())
        }
        Command::Serve { host, port } => {
            let sim = Simulation::from_config(config).context("building simulation")?;
            server::serve(sim, &host, port)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config: SimConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}

fn run(config: SimConfig, out: Option<&Path>) -> Result<()> {
    println!("=== highway ===");
    println!(
        "Road: {} lanes × {} cells  |  Spawn ticks: {}  |  Ticks: {}  |  Seed: {}",
        config.lanes, config.length, config.spawn_ticks, config.total_ticks, config.seed
    );

    let mut sim = Simulation::from_config(config).context("building simulation")?;
    let t0 = Instant::now();

    let totals = match out {
        Some(dir) => {
            let writer = CsvWriter::new(dir)
                .with_context(|| format!("creating output files in {}", dir.display()))?;
            let mut tally = Tally::new(SimOutputObserver::new(writer));
            sim.run(&mut tally)?;
            if let Some(e) = tally.inner.take_error() {
                return Err(e).context("writing output");
            }
            println!("Output written to {}", dir.display());
            tally.totals
        }
        None => {
            let mut tally = Tally::new(NoopObserver);
            sim.run(&mut tally)?;
            tally.totals
        }
    };

    println!();
    println!("Ticks run:     {}", totals.ticks);
    println!("Spawned:       {}", totals.spawned);
    println!("Exited:        {}", totals.exited);
    println!("Still on road: {}", sim.scheduler().live_count());
    println!("Peak on road:  {}", totals.peak_live);
    println!("Lane changes:  {}", totals.lane_changes);
    match totals.locked {
        Some(id) => println!("Locked:        {id}"),
        None => println!("Locked:        none"),
    }
    println!("Elapsed:       {:.2?}", t0.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests;
