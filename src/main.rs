//! Plinko API Server
//!
//! Loads configuration, builds the path cache, then serves `POST /play`.

use clap::Parser;
use plinko::{
    api::ApiServer,
    config::{generate_sample_config, ConfigLoader},
    logging::{init_tracing, DEFAULT_FILTER},
    GameProcessor, PlinkoResult,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "plinko")]
#[command(about = "Plinko outcome service", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Override server host
    #[arg(long)]
    host: Option<String>,

    /// Override server port
    #[arg(long)]
    port: Option<u16>,

    /// Fixed generator seed for reproducible outcomes
    #[arg(long)]
    seed: Option<u64>,

    /// Write a sample configuration to this path and exit
    #[arg(long, value_name = "PATH")]
    generate_config: Option<String>,
}

#[tokio::main]
async fn main() {
    init_tracing(DEFAULT_FILTER);

    if let Err(e) = run(Args::parse()).await {
        error!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> PlinkoResult<()> {
    if let Some(path) = args.generate_config {
        generate_sample_config(&path)?;
        info!("📝 Sample configuration written to {}", path);
        return Ok(());
    }

    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_path(path);
    }
    let mut config = loader.load()?;

    // CLI flags win over file and environment
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(seed) = args.seed {
        config.game.rng_seed = Some(seed);
    }
    loader.validate(&config)?;

    info!("🚀 Starting Plinko v{}", env!("CARGO_PKG_VERSION"));
    let processor = Arc::new(GameProcessor::from_config(&config.game)?);

    ApiServer::new(config.server, processor).run().await
}
