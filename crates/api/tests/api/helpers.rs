use std::sync::Arc;

use api::{app, AppState, Error, StationData};
use async_trait::async_trait;
use axum::Router;
use mockall::mock;
use serde_json::Value;

mock! {
    pub StationAccess {}

    #[async_trait]
    impl StationData for StationAccess {
        async fn stations_geojson(&self) -> Result<Value, Error>;
    }
}

pub struct TestApp {
    pub app: Router,
}

pub async fn spawn_app(station_db: Arc<dyn StationData>) -> TestApp {
    TestApp {
        app: app(AppState { station_db }),
    }
}
