//! Plinko batch simulator
//!
//! Plays a fixed number of games in-process and writes an RTP and
//! multiplier-distribution report.

use clap::Parser;
use plinko::{
    config::ConfigLoader,
    logging::{init_tracing, DEFAULT_FILTER},
    simulation::{default_output_path, log_report, write_report, SimulationConfig, SimulationRunner},
    GameProcessor, PlinkoResult,
};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "plinko-simulate")]
#[command(about = "Simulate Plinko games and report the observed return to player", long_about = None)]
struct Args {
    /// Number of games to play
    #[arg(long, default_value = "10000")]
    games: u64,

    /// Board rows
    #[arg(long, default_value = "16")]
    rows: u32,

    /// Difficulty level
    #[arg(long, default_value = "1")]
    difficulty: u32,

    /// Bet per game
    #[arg(long, default_value = "100")]
    bet: f64,

    /// Games per progress batch
    #[arg(long, default_value = "100")]
    batch_size: u64,

    /// Report path (default: ./simulations/simulation_{ms}_{rows}_{difficulty}.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Generator seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// TOML configuration file for limits and multipliers
    #[arg(short, long)]
    config: Option<String>,
}

fn main() {
    init_tracing(DEFAULT_FILTER);

    if let Err(e) = run(Args::parse()) {
        error!("❌ Simulation failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> PlinkoResult<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_path(path);
    }
    let mut config = loader.load()?;
    if args.seed.is_some() {
        config.game.rng_seed = args.seed;
    }

    let settings = SimulationConfig {
        num_games: args.games,
        rows: args.rows,
        difficulty: args.difficulty,
        bet: args.bet,
        batch_size: args.batch_size,
    };
    let output = args
        .output
        .unwrap_or_else(|| default_output_path(settings.rows, settings.difficulty));
    info!("⚙️  {:?}, output {}", settings, output.display());

    let processor = GameProcessor::from_config(&config.game)?;
    let report = SimulationRunner::new(&processor, settings).run()?;

    write_report(&report, &output)?;
    log_report(&report);
    info!("💾 Results written to: {}", output.display());

    Ok(())
}
