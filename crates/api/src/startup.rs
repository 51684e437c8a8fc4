use std::sync::Arc;

use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use dwd_atlas_core::DbConfig;
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::{get_stations, Database, StationAccess, StationData};

#[derive(Clone)]
pub struct AppState {
    pub station_db: Arc<dyn StationData>,
}

pub async fn build_app_state(db_config: &DbConfig) -> Result<AppState, anyhow::Error> {
    let db = Database::new(db_config).await?;
    let station_db = Arc::new(StationAccess::new(db.pool().clone()));

    Ok(AppState { station_db })
}

pub fn app(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/stations", get(get_stations))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default();
    info!(target: "http_request","new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
