use std::path::PathBuf;

use clap::Parser;
use dwd_atlas_core::DbConfig;
use ingest::{connect_database, mosmix, setup_logger};
use slog::info;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Upsert DWD MOSMIX stations from a CSV export into PostGIS"
)]
struct Cli {
    /// Path to local dot env file
    #[arg(short, long)]
    env: PathBuf,

    /// Path to your local CSV file
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

    let summary = mosmix::ingest_csv(&pool, &cli.src, &logger).await?;
    info!(logger, "finished: {}", summary);

    Ok(())
}
