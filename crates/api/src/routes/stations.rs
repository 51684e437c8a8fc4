use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use log::error;

use crate::AppState;

/// GET /stations
///
/// Every stored climate station as one GeoJSON FeatureCollection; an empty
/// object when none are stored.
pub async fn get_stations(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.station_db.stations_geojson().await {
        Ok(collection) => Json(collection).into_response(),
        Err(err) => {
            error!("error loading stations: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
