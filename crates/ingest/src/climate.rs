//! Climate station list ingestion.
//!
//! The DWD climate station list is a header-having delimited file read by
//! fixed column position: id, start date, end date, height, longitude,
//! latitude, city name, county name. Dates use the compact `YYYYMMDD`
//! format. Rows are inserted plain (no upsert); the stored geometry is
//! derived in-database from the coordinate pair.

use std::path::Path;

use anyhow::{Context, Result};
use slog::{error, info, Logger};
use sqlx::PgPool;
use time::{macros::format_description, Date};

use crate::outcome::{Outcome, RunSummary};

/// Fully-typed climate station record.
///
/// Coercion here is strict: any bad field fails the whole row, which is
/// then skipped with a logged cause.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateStation {
    pub station_id: i32,
    pub start_date: Date,
    pub end_date: Date,
    pub height: i32,
    pub longitude: f64,
    pub latitude: f64,
    pub city_name: String,
    pub county_name: String,
}

impl ClimateStation {
    /// Build a typed record from one positional row.
    pub fn from_record(record: &csv::StringRecord) -> Result<Self> {
        let field = |index: usize| -> Result<&str> {
            record
                .get(index)
                .with_context(|| format!("missing column {index}"))
        };

        Ok(Self {
            station_id: field(0)?
                .trim()
                .parse()
                .context("station id is not an integer")?,
            start_date: parse_compact_date(field(1)?)?,
            end_date: parse_compact_date(field(2)?)?,
            height: field(3)?
                .trim()
                .parse()
                .context("height is not an integer")?,
            longitude: field(4)?
                .trim()
                .parse()
                .context("longitude is not a number")?,
            latitude: field(5)?
                .trim()
                .parse()
                .context("latitude is not a number")?,
            city_name: field(6)?.trim().to_owned(),
            county_name: field(7)?.trim().to_owned(),
        })
    }
}

/// Parse a `YYYYMMDD` observation-range date.
pub fn parse_compact_date(raw: &str) -> Result<Date> {
    Date::parse(raw.trim(), format_description!("[year][month][day]"))
        .with_context(|| format!("invalid date {raw:?}, expected YYYYMMDD"))
}

/// Create the spatial extension and the `stations` table when absent.
pub async fn prepare_schema(pool: &PgPool) -> Result<()> {
    sqlx::query("CREATE EXTENSION IF NOT EXISTS postgis")
        .execute(pool)
        .await
        .context("failed to create postgis extension")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS stations (
            station_id INTEGER PRIMARY KEY,
            start_date DATE NOT NULL,
            end_date DATE NOT NULL,
            height INTEGER NOT NULL,
            city_name VARCHAR(255) NOT NULL,
            county_name VARCHAR(255) NOT NULL,
            geom GEOMETRY NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create stations table")?;

    Ok(())
}

const INSERT_SQL: &str = r#"
    INSERT INTO stations (station_id, start_date, end_date, height, city_name, county_name, geom)
    VALUES ($1, $2, $3, $4, $5, $6, ST_SetSRID(ST_MakePoint($7, $8), 4326))
"#;

/// Insert one climate station with its derived SRID-4326 point geometry.
pub async fn insert_station(pool: &PgPool, station: &ClimateStation) -> Result<()> {
    sqlx::query(INSERT_SQL)
        .bind(station.station_id)
        .bind(station.start_date)
        .bind(station.end_date)
        .bind(station.height)
        .bind(&station.city_name)
        .bind(&station.county_name)
        .bind(station.longitude)
        .bind(station.latitude)
        .execute(pool)
        .await?;
    Ok(())
}

/// Stream the station list at `src` into the `stations` table.
///
/// The header row is skipped; a row with an unparsable field (a malformed
/// date, typically) or a failed insert is logged and skipped, and the run
/// continues to the next row.
pub async fn ingest_file(pool: &PgPool, src: &Path, logger: &Logger) -> Result<RunSummary> {
    let mut reader = csv::Reader::from_path(src)
        .with_context(|| format!("failed to open station list: {}", src.display()))?;

    let mut summary = RunSummary::default();
    for result in reader.records() {
        let station = match result
            .map_err(anyhow::Error::from)
            .and_then(|record| ClimateStation::from_record(&record))
        {
            Ok(station) => station,
            Err(err) => {
                error!(logger, "skipping row: {:#}", err);
                summary.record(&Outcome::skipped(&err));
                continue;
            }
        };

        match insert_station(pool, &station).await {
            Ok(()) => {
                info!(logger, "inserted station {}", station.station_id);
                summary.record(&Outcome::Inserted(station.station_id as i64));
            }
            Err(err) => {
                error!(
                    logger,
                    "error with station {}: {:#}", station.station_id, err
                );
                summary.record(&Outcome::skipped(&err));
            }
        }
    }

    Ok(summary)
}
