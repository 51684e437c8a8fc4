use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query postgres: {0}")]
    Query(#[from] sqlx::Error),
}

#[async_trait]
pub trait StationData: Sync + Send {
    /// All stored climate stations as one GeoJSON FeatureCollection, or an
    /// empty object when the table is empty.
    async fn stations_geojson(&self) -> Result<Value, Error>;
}

pub struct StationAccess {
    pool: PgPool,
}

impl StationAccess {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// The FeatureCollection is assembled in-database: one Feature per station,
/// geometry reprojected to SRID 4326, properties carrying every
/// non-geometry column.
const GEOJSON_SQL: &str = r#"
    SELECT jsonb_build_object(
        'type', 'FeatureCollection',
        'features', jsonb_agg(fc.feature)
    )
    FROM (
        SELECT jsonb_build_object(
            'type', 'Feature',
            'geometry', ST_AsGeoJSON(ST_Transform(s.geom, 4326))::jsonb,
            'properties', jsonb_build_object('station_id', to_jsonb(s.station_id),
            'start_date', to_jsonb(s.start_date), 'end_date', to_jsonb(s.end_date),
            'height', to_jsonb(s.height), 'city_name', to_jsonb(s.city_name),
            'county_name', to_jsonb(s.county_name))
        ) AS feature
        FROM stations AS s
    ) AS fc
"#;

#[async_trait]
impl StationData for StationAccess {
    async fn stations_geojson(&self) -> Result<Value, Error> {
        let collection: Value = sqlx::query_scalar(GEOJSON_SQL).fetch_one(&self.pool).await?;
        Ok(normalize_collection(collection))
    }
}

/// jsonb_agg over zero rows yields a null features array; callers get an
/// empty object instead of a hollow FeatureCollection.
fn normalize_collection(collection: Value) -> Value {
    if collection["features"].is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_table_collection_becomes_an_empty_object() {
        let collection = json!({
            "type": "FeatureCollection",
            "features": null
        });
        assert_eq!(normalize_collection(collection), json!({}));
    }

    #[test]
    fn populated_collection_passes_through_unchanged() {
        let collection = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [9.98, 53.63] },
                "properties": { "station_id": 1 }
            }]
        });
        assert_eq!(normalize_collection(collection.clone()), collection);
    }

    #[test]
    fn feature_collection_is_built_in_database() {
        assert!(GEOJSON_SQL.contains("'type', 'FeatureCollection'"));
        assert!(GEOJSON_SQL.contains("ST_AsGeoJSON(ST_Transform(s.geom, 4326))"));
        // every non-geometry column appears in the feature properties
        for column in [
            "station_id",
            "start_date",
            "end_date",
            "height",
            "city_name",
            "county_name",
        ] {
            assert!(GEOJSON_SQL.contains(&format!("to_jsonb(s.{column})")));
        }
    }
}
