use std::path::PathBuf;

use clap::Parser;
use dwd_atlas_core::DbConfig;
use ingest::{climate, connect_database, setup_logger};
use slog::info;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Insert DWD climate stations from the station list into PostGIS"
)]
struct Cli {
    /// Path to local dot env file
    #[arg(short, long)]
    env: PathBuf,

    /// Path to the climate station list file
    #[arg(short, long)]
    src: PathBuf,

    /// Print more verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print detailed debug output
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let logger = setup_logger(cli.verbose, cli.debug);

    let config = DbConfig::from_env_file(&cli.env)?;
    let pool = connect_database(&config).await?;
    info!(logger, "connection to database established");

    climate::prepare_schema(&pool).await?;

    let summary = climate::ingest_file(&pool, &cli.src, &logger).await?;
    info!(logger, "finished: {}", summary);

    Ok(())
}
