//! MOSMIX station CSV ingestion.
//!
//! Reads the CSV export produced by the KML parser tool and upserts every
//! row into `global_mosmix_stations`, keyed on `station_id`. Expects the
//! table to carry a `BIGSERIAL` surrogate `id` used to report insert vs
//! update.

use std::path::Path;

use anyhow::Context;
use geo_types::Geometry;
use geozero::wkb;
use serde::Deserialize;
use slog::{debug, error, info, Logger};
use sqlx::{PgPool, Row};

use crate::coerce::coerce;
use crate::coordinates;
use crate::outcome::{Outcome, RunSummary};

/// One row of the MOSMIX station CSV, untyped.
#[derive(Debug, Default, Deserialize)]
pub struct RawMosmixRow {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    #[serde(default)]
    pub elevation: String,
}

/// Fully-typed MOSMIX station record.
///
/// Every field except the name is nullable: a coercion failure nulls that
/// field alone, the record is still written.
#[derive(Debug, Clone, PartialEq)]
pub struct MosmixStation {
    pub station_id: Option<String>,
    pub station_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub station_elevation: Option<i32>,
}

impl From<&RawMosmixRow> for MosmixStation {
    fn from(row: &RawMosmixRow) -> Self {
        let id = row.id.trim();
        Self {
            station_id: (!id.is_empty()).then(|| id.to_owned()),
            station_name: row.name.trim().to_owned(),
            latitude: coerce::<f64>("latitude", &row.latitude).ok(),
            longitude: coerce::<f64>("longitude", &row.longitude).ok(),
            station_elevation: coerce::<i32>("elevation", &row.elevation).ok(),
        }
    }
}

impl MosmixStation {
    /// Point geometry derived from the coordinate pair; null when either
    /// half failed to parse.
    pub fn geometry(&self) -> Option<geo_types::Point<f64>> {
        coordinates::point(self.longitude, self.latitude)
    }
}

const UPSERT_SQL: &str = r#"
    INSERT INTO global_mosmix_stations (station_id,
        station_name, latitude, longitude, station_elevation, wkb_geometry)
    VALUES ($1, $2, $3, $4, $5, $6)
    ON CONFLICT (station_id)
    DO UPDATE SET
        station_name = EXCLUDED.station_name,
        latitude = EXCLUDED.latitude,
        longitude = EXCLUDED.longitude,
        station_elevation = EXCLUDED.station_elevation,
        wkb_geometry = EXCLUDED.wkb_geometry
    RETURNING id, (xmax = 0) AS inserted
"#;

/// Insert or update one station, replacing every mutable column on
/// conflict. Returns the surrogate row id and whether the row was new.
pub async fn upsert_station(pool: &PgPool, station: &MosmixStation) -> anyhow::Result<Outcome> {
    let geometry = station.geometry().map(|p| wkb::Encode(Geometry::Point(p)));

    let row = sqlx::query(UPSERT_SQL)
        .bind(&station.station_id)
        .bind(&station.station_name)
        .bind(station.latitude)
        .bind(station.longitude)
        .bind(station.station_elevation)
        .bind(geometry)
        .fetch_one(pool)
        .await?;

    let id: i64 = row.try_get("id")?;
    let inserted: bool = row.try_get("inserted")?;

    Ok(if inserted {
        Outcome::Inserted(id)
    } else {
        Outcome::Updated(id)
    })
}

/// Stream the CSV at `src` through the coercer and upsert writer.
///
/// Per-record failures are logged with the offending station's name and do
/// not stop the run; only an unreadable file is fatal.
pub async fn ingest_csv(pool: &PgPool, src: &Path, logger: &Logger) -> anyhow::Result<RunSummary> {
    let mut reader = csv::Reader::from_path(src)
        .with_context(|| format!("failed to open csv file: {}", src.display()))?;

    let mut summary = RunSummary::default();
    for result in reader.deserialize::<RawMosmixRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(err) => {
                error!(logger, "skipping unreadable row: {}", err);
                summary.record(&Outcome::Skipped(err.to_string()));
                continue;
            }
        };

        let station = MosmixStation::from(&raw);
        debug!(logger, "coerced record"; "station" => %station.station_name);

        let outcome = upsert_station(pool, &station)
            .await
            .unwrap_or_else(|err| Outcome::skipped(&err));

        match &outcome {
            Outcome::Inserted(id) => {
                info!(
                    logger,
                    "Inserted station {} with id {}", station.station_name, id
                );
            }
            Outcome::Updated(id) => {
                info!(
                    logger,
                    "Updated station {} with id {}", station.station_name, id
                );
            }
            Outcome::Skipped(reason) => {
                error!(
                    logger,
                    "Error with station {}: {}", station.station_name, reason
                );
            }
        }
        summary.record(&outcome);
    }

    Ok(summary)
}
