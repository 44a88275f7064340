//! Simultaneous writers against a file-backed database with a real pool.
//!
//! Run with: cargo test --test concurrency_test

mod common;

use axum::http::{Method, StatusCode};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use tokio::task::JoinSet;

use common::{TestApp, ADMIN};
use telemetry_registry::entity::{location, sensor, sensor_data};

const SENSORS: usize = 4;
const INGESTS: usize = 200;
const READINGS_PER_INGEST: usize = 3;
const UPDATES: usize = 100;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_ingests_and_updates_all_commit() {
    let app = TestApp::file_backed(5).await;
    let (company_id, _) = app.create_company("Acme").await;
    let location_id = app.create_location(company_id, "Plant").await;

    let mut sensors = Vec::with_capacity(SENSORS);
    for n in 0..SENSORS {
        sensors.push(app.create_sensor(location_id, &format!("T{n}")).await);
    }

    let mut tasks = JoinSet::new();
    for n in 0..INGESTS {
        let app = app.clone();
        let key = sensors[n % SENSORS].1.clone();
        tasks.spawn(async move {
            let readings: Vec<_> = (0..READINGS_PER_INGEST)
                .map(|i| json!({ "batch": n, "i": i }))
                .collect();
            app.send(
                Method::POST,
                "/api/v1/sensor_data",
                None,
                Some(json!({ "api_key": key, "json_data": readings })),
            )
            .await
        });
    }
    for n in 0..UPDATES {
        let app = app.clone();
        tasks.spawn(async move {
            app.send(
                Method::PUT,
                &format!("/api/v1/locations/{location_id}"),
                Some(ADMIN),
                Some(json!({ "location_city": format!("City {n}") })),
            )
            .await
        });
    }
    for n in 0..UPDATES {
        let app = app.clone();
        let sensor_id = sensors[n % SENSORS].0;
        tasks.spawn(async move {
            app.send(
                Method::PUT,
                &format!("/api/v1/sensors/{sensor_id}"),
                Some(ADMIN),
                Some(json!({ "sensor_meta": format!("rev {n}") })),
            )
            .await
        });
    }

    let mut failures = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (status, body) = joined.unwrap();
        if !status.is_success() {
            failures.push((status, body));
        }
    }
    assert!(failures.is_empty(), "failed writes: {failures:?}");

    let stored = sensor_data::Entity::find().count(&app.db).await.unwrap();
    assert_eq!(stored, (INGESTS * READINGS_PER_INGEST) as u64);

    let plant = location::Entity::find_by_id(location_id)
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();
    assert!(plant.location_city.starts_with("City "));

    for (sensor_id, _) in &sensors {
        let stored = sensor::Entity::find_by_id(*sensor_id)
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.sensor_meta.unwrap().starts_with("rev "));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_ingests_with_a_bad_key_only_reject_that_request() {
    let app = TestApp::file_backed(5).await;
    let (company_id, _) = app.create_company("Acme").await;
    let location_id = app.create_location(company_id, "Plant").await;
    let (_, key) = app.create_sensor(location_id, "T1").await;

    let mut tasks = JoinSet::new();
    for n in 0..50 {
        let app = app.clone();
        let key = if n == 25 { "nope".to_string() } else { key.clone() };
        tasks.spawn(async move {
            app.send(
                Method::POST,
                "/api/v1/sensor_data",
                None,
                Some(json!({ "api_key": key, "json_data": [{ "n": n }] })),
            )
            .await
        });
    }

    let mut statuses = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        statuses.push(joined.unwrap().0);
    }
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::CREATED).count(),
        49
    );
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::BAD_REQUEST).count(),
        1
    );
    assert_eq!(sensor_data::Entity::find().count(&app.db).await.unwrap(), 49);
}
