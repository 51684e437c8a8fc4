use std::time::Duration;

use anyhow::{Context, Result};
use dwd_atlas_core::DbConfig;
use log::info;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

/// Read-side Postgres handle for the API server.
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(config: &DbConfig) -> Result<Self> {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.name)
            .username(&config.user)
            .password(&config.pass);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .context("Failed to create database connection pool")?;

        let db = Self { pool };
        db.health_check().await?;
        info!(
            "Postgres database connected: {}:{}/{}",
            config.host, config.port, config.name
        );

        Ok(db)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("Database connectivity check failed")?;
        Ok(())
    }
}
