pub mod admin;
pub mod companies;
pub mod health;
pub mod locations;
pub mod sensor_data;
pub mod sensors;
pub mod types;

use axum::{middleware, routing::get, routing::post, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::auth;
use crate::common::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        admin::login,
        companies::create_company,
        locations::create_location,
        locations::list_locations,
        locations::get_location,
        locations::update_location,
        locations::delete_location,
        sensors::create_sensor,
        sensors::list_sensors,
        sensors::get_sensor,
        sensors::update_sensor,
        sensors::delete_sensor,
        sensor_data::ingest_sensor_data,
        sensor_data::query_sensor_data,
        sensor_data::get_sensor_data,
        sensor_data::delete_sensor_data,
    ),
    components(
        schemas(
            types::MessageResponse,
            types::ErrorResponse,
            admin::LoginRequest,
            companies::CreateCompanyRequest,
            companies::CompanyCreatedResponse,
            locations::CreateLocationRequest,
            locations::UpdateLocationRequest,
            locations::LocationResponse,
            locations::LocationCreatedResponse,
            sensors::CreateSensorRequest,
            sensors::UpdateSensorRequest,
            sensors::SensorResponse,
            sensors::SensorCreatedResponse,
            sensor_data::IngestRequest,
            sensor_data::IngestResponse,
            sensor_data::ReadingResponse,
            sensor_data::SensorDataResponse,
            sensor_data::SensorDataDetailResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "admin", description = "Admin credential check"),
        (name = "companies", description = "Tenant registration"),
        (name = "locations", description = "Company locations"),
        (name = "sensors", description = "Sensors installed at locations"),
        (name = "sensor_data", description = "Reading ingestion and queries"),
    ),
    info(
        title = "Telemetry Registry API",
        description = "Multi-tenant IoT telemetry registry. Mutating endpoints take admin credentials via HTTP Basic.",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/admin/login", post(admin::login))
        .route("/companies", post(companies::create_company))
        .route(
            "/locations",
            get(locations::list_locations).post(locations::create_location),
        )
        .route(
            "/locations/{id}",
            get(locations::get_location)
                .put(locations::update_location)
                .delete(locations::delete_location),
        )
        .route(
            "/sensors",
            get(sensors::list_sensors).post(sensors::create_sensor),
        )
        .route(
            "/sensors/{id}",
            get(sensors::get_sensor)
                .put(sensors::update_sensor)
                .delete(sensors::delete_sensor),
        )
        .route(
            "/sensor_data",
            get(sensor_data::query_sensor_data).post(sensor_data::ingest_sensor_data),
        )
        .route(
            "/sensor_data/{id}",
            get(sensor_data::get_sensor_data).delete(sensor_data::delete_sensor_data),
        )
        // Credentials are checked once per request, before any handler
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::authenticate,
        ))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_bytes));

    // Health check routes (no auth)
    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    // Combine all routes
    Router::new()
        .nest("/api/v1", api_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// OpenAPI document served at `/docs`, exposed for tooling.
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
