use std::time::Duration;

use anyhow::Context;
use dwd_atlas_core::DbConfig;
use slog::{o, Drain, Level, Logger};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Terminal logger for the ingestion tools.
///
/// `--debug` wins over `--verbose`; with neither flag only warnings and
/// errors are shown.
pub fn setup_logger(verbose: bool, debug: bool) -> Logger {
    let log_level = if debug {
        Level::Debug
    } else if verbose {
        Level::Info
    } else {
        Level::Warning
    };

    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = drain.filter_level(log_level).fuse();
    slog::Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")))
}

/// Open the database session for a run.
///
/// Ingestion is strictly sequential with exactly one writer, so the pool
/// holds a single connection for the run's duration.
pub async fn connect_database(config: &DbConfig) -> anyhow::Result<PgPool> {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.name)
        .username(&config.user)
        .password(&config.pass);

    PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await
        .context("failed to connect to database")
}
