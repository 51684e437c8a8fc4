use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::Request,
};
use hyper::Method;
use serde_json::{from_slice, json, Value};
use tower::ServiceExt;

use crate::helpers::{spawn_app, MockStationAccess};

#[tokio::test]
async fn empty_station_table_yields_an_empty_object() {
    let mut station_db = MockStationAccess::new();
    station_db
        .expect_stations_geojson()
        .times(1)
        .returning(|| Ok(json!({})));
    let test_app = spawn_app(Arc::new(station_db)).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/stations")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = from_slice(&body).unwrap();
    assert_eq!(value, json!({}));
}

#[tokio::test]
async fn stations_are_served_as_a_feature_collection() {
    let mut station_db = MockStationAccess::new();
    station_db
        .expect_stations_geojson()
        .times(1)
        .returning(|| Ok(hamburg_collection()));
    let test_app = spawn_app(Arc::new(station_db)).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/stations")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = from_slice(&body).unwrap();

    assert_eq!(value["type"], "FeatureCollection");
    let feature = &value["features"][0];
    assert_eq!(feature["properties"]["station_id"], 1);
    assert_eq!(feature["properties"]["city_name"], "Hamburg");
    assert_eq!(feature["geometry"]["coordinates"], json!([9.98, 53.63]));
}

#[tokio::test]
async fn query_failure_maps_to_internal_server_error() {
    let mut station_db = MockStationAccess::new();
    station_db
        .expect_stations_geojson()
        .times(1)
        .returning(|| Err(api::Error::Query(sqlx::Error::PoolTimedOut)));
    let test_app = spawn_app(Arc::new(station_db)).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/stations")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), 500);
}

fn hamburg_collection() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [9.98, 53.63]
            },
            "properties": {
                "station_id": 1,
                "start_date": "1937-01-01",
                "end_date": "2022-12-31",
                "height": 300,
                "city_name": "Hamburg",
                "county_name": "Hamburg"
            }
        }]
    })
}
