//! Shared harness: a fully migrated registry behind the real router.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use base64::Engine;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use telemetry_registry::common::AppState;
use telemetry_registry::config::Config;
use telemetry_registry::{db, routes};

pub const ADMIN: (&str, &str) = ("admin", "admin1");

#[derive(Clone)]
pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    // Keeps the database file alive for file-backed apps
    _dir: Option<Arc<TempDir>>,
}

impl TestApp {
    /// Single-connection in-memory database.
    pub async fn new() -> Self {
        Self::with_config(Config::in_memory(), None).await
    }

    /// SQLite file in a temp directory, served by a pool of `connections`.
    pub async fn file_backed(connections: u32) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.db");
        let config = Config {
            database_url: format!("sqlite://{}?mode=rwc", path.display()),
            db_max_connections: connections,
            ..Config::default()
        };
        Self::with_config(config, Some(Arc::new(dir))).await
    }

    async fn with_config(config: Config, dir: Option<Arc<TempDir>>) -> Self {
        let db = db::connect(&config).await.unwrap();
        db::prepare(&db, &config).await.unwrap();
        let router = routes::build_router(AppState::new(db.clone(), config));
        Self {
            router,
            db,
            _dir: dir,
        }
    }

    /// Send a request and return (status, parsed JSON body or `Null`).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        auth: Option<(&str, &str)>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some((user, pass)) = auth {
            builder = builder.header(header::AUTHORIZATION, basic(user, pass));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let resp = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Send a raw (possibly malformed) JSON body.
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        auth: Option<(&str, &str)>,
        raw: &str,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some((user, pass)) = auth {
            builder = builder.header(header::AUTHORIZATION, basic(user, pass));
        }
        let resp = self
            .router
            .clone()
            .oneshot(builder.body(Body::from(raw.to_string())).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    pub async fn create_company(&self, name: &str) -> (i32, String) {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/companies",
                Some(ADMIN),
                Some(serde_json::json!({ "company_name": name })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        (
            body["id"].as_i64().unwrap() as i32,
            body["company_api_key"].as_str().unwrap().to_string(),
        )
    }

    pub async fn create_location(&self, company_id: i32, name: &str) -> i32 {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/locations",
                Some(ADMIN),
                Some(serde_json::json!({
                    "company_id": company_id,
                    "location_name": name,
                    "location_country": "Chile",
                    "location_city": "Santiago",
                    "location_meta": null,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap() as i32
    }

    pub async fn create_sensor(&self, location_id: i32, name: &str) -> (i32, String) {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/sensors",
                Some(ADMIN),
                Some(serde_json::json!({
                    "location_id": location_id,
                    "sensor_name": name,
                    "sensor_category": "temperature",
                    "sensor_meta": "rooftop",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        (
            body["id"].as_i64().unwrap() as i32,
            body["sensor_api_key"].as_str().unwrap().to_string(),
        )
    }
}

pub fn basic(user: &str, pass: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{user}:{pass}"));
    format!("Basic {encoded}")
}
