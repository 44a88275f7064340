use std::collections::BTreeSet;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use sea_orm::{
    ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::auth::RequireAdmin;
use crate::common::{required, AppState, CompanyKeyQuery, JsonBody, ResourceId};
use crate::entity::{company, sensor, sensor_data};
use crate::error::{AppError, AppResult};
use crate::routes::types::MessageResponse;

use super::params::{non_empty, parse_sensor_ids, parse_timestamp};
use super::types::{
    IngestRequest, IngestResponse, ReadingResponse, SensorDataDetailResponse, SensorDataQuery,
    SensorDataResponse,
};

/// Rows per INSERT statement, well below SQLite's bound-parameter limit.
const INSERT_CHUNK: usize = 500;

fn not_found() -> AppError {
    AppError::NotFound("Datos del sensor no encontrados".to_string())
}

/// Ingest readings
///
/// Authenticated by the sensor's own `api_key` in the body. All readings in
/// one request share a single server-assigned timestamp and are stored in
/// one transaction.
#[utoipa::path(
    post,
    path = "/api/v1/sensor_data",
    request_body = IngestRequest,
    responses(
        (status = 201, description = "Readings stored", body = IngestResponse),
        (status = 400, description = "Missing field or unknown sensor API key"),
    ),
    tag = "sensor_data"
)]
pub async fn ingest_sensor_data(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<IngestRequest>,
) -> AppResult<(StatusCode, Json<IngestResponse>)> {
    let api_key = required(body.api_key, "api_key")?;
    let measurements = required(body.json_data, "json_data")?;

    let owner = sensor::Entity::find()
        .filter(sensor::Column::SensorApiKey.eq(api_key))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::InvalidApiKey("API key inválida".to_string()))?;

    // The first statement inside the transaction must be a write, so SQLite
    // waits for the write lock instead of failing a read-to-write upgrade.
    let timestamp = Utc::now().timestamp();
    let txn = state.db.begin().await?;
    for chunk in measurements.chunks(INSERT_CHUNK) {
        let rows = chunk.iter().map(|measurement| sensor_data::ActiveModel {
            sensor_id: Set(owner.id),
            json_data: Set(measurement.clone()),
            timestamp: Set(timestamp),
            ..Default::default()
        });
        sensor_data::Entity::insert_many(rows).exec(&txn).await?;
    }
    txn.commit().await?;

    tracing::info!(
        sensor_id = owner.id,
        count = measurements.len(),
        timestamp,
        "Sensor readings ingested"
    );

    Ok((
        StatusCode::CREATED,
        Json(IngestResponse {
            message: "Datos del sensor creados".to_string(),
            count: measurements.len(),
        }),
    ))
}

/// Query readings by sensor set and time range
///
/// The company key must exist, but it does not restrict which sensors can
/// be read. Requested ids without a sensor are reported in
/// `sensores_no_existentes`.
#[utoipa::path(
    get,
    path = "/api/v1/sensor_data",
    params(SensorDataQuery),
    responses(
        (status = 200, description = "Readings retrieved successfully", body = SensorDataResponse),
        (status = 400, description = "Missing or invalid parameters, or unknown company API key"),
    ),
    tag = "sensor_data"
)]
pub async fn query_sensor_data(
    State(state): State<AppState>,
    Query(query): Query<SensorDataQuery>,
) -> AppResult<Json<SensorDataResponse>> {
    let (Some(company_api_key), Some(from), Some(to), Some(sensor_ids)) = (
        non_empty(query.company_api_key),
        non_empty(query.from),
        non_empty(query.to),
        non_empty(query.sensor_id),
    ) else {
        return Err(AppError::MissingParameter("Parámetros faltantes".to_string()));
    };

    company::Entity::find()
        .filter(company::Column::CompanyApiKey.eq(company_api_key))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::InvalidApiKey("API key de la compañía inválida".to_string()))?;

    let requested = parse_sensor_ids(&sensor_ids)?;
    let from = parse_timestamp(&from)?;
    let to = parse_timestamp(&to)?;

    // Ids beyond the i32 key range cannot match a row; they end up missing.
    let existing: Vec<i32> = sensor::Entity::find()
        .select_only()
        .column(sensor::Column::Id)
        .filter(
            sensor::Column::Id.is_in(requested.iter().filter_map(|id| i32::try_from(*id).ok())),
        )
        .into_tuple()
        .all(&state.db)
        .await?;

    let existing_set: BTreeSet<i64> = existing.iter().map(|id| i64::from(*id)).collect();
    let missing: Vec<i64> = requested
        .iter()
        .copied()
        .filter(|id| !existing_set.contains(id))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let readings = if existing.is_empty() {
        Vec::new()
    } else {
        sensor_data::Entity::find()
            .filter(sensor_data::Column::SensorId.is_in(existing))
            .filter(sensor_data::Column::Timestamp.gte(from))
            .filter(sensor_data::Column::Timestamp.lte(to))
            .order_by_asc(sensor_data::Column::Timestamp)
            .order_by_asc(sensor_data::Column::Id)
            .all(&state.db)
            .await?
    };

    tracing::debug!(
        from,
        to,
        rows = readings.len(),
        missing = missing.len(),
        "Sensor data query"
    );

    Ok(Json(SensorDataResponse {
        data: readings.into_iter().map(ReadingResponse::from).collect(),
        sensores_no_existentes: missing,
    }))
}

/// Get one reading by id
#[utoipa::path(
    get,
    path = "/api/v1/sensor_data/{id}",
    params(
        ("id" = i32, Path, description = "Reading id"),
        CompanyKeyQuery,
    ),
    responses(
        (status = 200, description = "Reading retrieved successfully", body = SensorDataDetailResponse),
        (status = 400, description = "Missing company_api_key"),
        (status = 404, description = "Reading not found"),
    ),
    tag = "sensor_data"
)]
pub async fn get_sensor_data(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    Query(query): Query<CompanyKeyQuery>,
) -> AppResult<Json<SensorDataDetailResponse>> {
    query.require()?;

    let found = sensor_data::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(found.into()))
}

/// Delete one reading
#[utoipa::path(
    delete,
    path = "/api/v1/sensor_data/{id}",
    params(
        ("id" = i32, Path, description = "Reading id"),
        CompanyKeyQuery,
    ),
    responses(
        (status = 200, description = "Reading deleted", body = MessageResponse),
        (status = 400, description = "Missing company_api_key"),
        (status = 401, description = "Admin authentication required"),
        (status = 404, description = "Reading not found"),
    ),
    tag = "sensor_data"
)]
pub async fn delete_sensor_data(
    admin: RequireAdmin,
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    Query(query): Query<CompanyKeyQuery>,
) -> AppResult<Json<MessageResponse>> {
    query.require()?;

    let txn = state.db.begin().await?;
    let result = sensor_data::Entity::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(not_found());
    }
    txn.commit().await?;

    tracing::info!(reading_id = id, admin = %admin.username, "Sensor reading deleted");
    Ok(Json(MessageResponse::new("Datos del sensor eliminados")))
}
