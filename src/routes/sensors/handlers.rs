use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::auth::RequireAdmin;
use crate::common::{required, AppState, CompanyKeyQuery, JsonBody, ResourceId};
use crate::entity::sensor;
use crate::error::{AppError, AppResult};
use crate::routes::types::MessageResponse;

use super::types::{
    CreateSensorRequest, SensorCreatedResponse, SensorResponse, UpdateSensorRequest,
};

fn not_found() -> AppError {
    AppError::NotFound("Sensor no encontrado".to_string())
}

/// Register a sensor
///
/// The generated `sensor_api_key` is returned only in this response.
#[utoipa::path(
    post,
    path = "/api/v1/sensors",
    request_body = CreateSensorRequest,
    responses(
        (status = 201, description = "Sensor created", body = SensorCreatedResponse),
        (status = 400, description = "Missing field or malformed body"),
        (status = 401, description = "Admin authentication required"),
    ),
    tag = "sensors"
)]
pub async fn create_sensor(
    admin: RequireAdmin,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateSensorRequest>,
) -> AppResult<(StatusCode, Json<SensorCreatedResponse>)> {
    let location_id = required(body.location_id, "location_id")?;
    let sensor_name = required(body.sensor_name, "sensor_name")?;
    let sensor_category = required(body.sensor_category, "sensor_category")?;
    let sensor_meta = required(body.sensor_meta, "sensor_meta")?;
    let sensor_api_key = Uuid::new_v4().to_string();

    let txn = state.db.begin().await?;
    let created = sensor::ActiveModel {
        location_id: Set(location_id),
        sensor_name: Set(sensor_name),
        sensor_category: Set(sensor_category),
        sensor_meta: Set(sensor_meta),
        sensor_api_key: Set(sensor_api_key.clone()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(
        sensor_id = created.id,
        location_id,
        admin = %admin.username,
        "Sensor created"
    );

    Ok((
        StatusCode::CREATED,
        Json(SensorCreatedResponse {
            message: "Sensor creado".to_string(),
            id: created.id,
            sensor_api_key,
        }),
    ))
}

/// List all sensors
///
/// `company_api_key` must be present but does not filter the result.
#[utoipa::path(
    get,
    path = "/api/v1/sensors",
    params(CompanyKeyQuery),
    responses(
        (status = 200, description = "Sensors retrieved successfully", body = Vec<SensorResponse>),
        (status = 400, description = "Missing company_api_key"),
    ),
    tag = "sensors"
)]
pub async fn list_sensors(
    State(state): State<AppState>,
    Query(query): Query<CompanyKeyQuery>,
) -> AppResult<Json<Vec<SensorResponse>>> {
    query.require()?;

    let sensors_list = sensor::Entity::find()
        .order_by_asc(sensor::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(sensors_list.into_iter().map(SensorResponse::from).collect()))
}

/// Get a sensor by id
#[utoipa::path(
    get,
    path = "/api/v1/sensors/{id}",
    params(
        ("id" = i32, Path, description = "Sensor id"),
        CompanyKeyQuery,
    ),
    responses(
        (status = 200, description = "Sensor retrieved successfully", body = SensorResponse),
        (status = 400, description = "Missing company_api_key"),
        (status = 404, description = "Sensor not found"),
    ),
    tag = "sensors"
)]
pub async fn get_sensor(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    Query(query): Query<CompanyKeyQuery>,
) -> AppResult<Json<SensorResponse>> {
    query.require()?;

    let found = sensor::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(found.into()))
}

/// Update a sensor
///
/// Keys left out of the body keep their current value. The API key and
/// location cannot be changed.
#[utoipa::path(
    put,
    path = "/api/v1/sensors/{id}",
    params(("id" = i32, Path, description = "Sensor id")),
    request_body = UpdateSensorRequest,
    responses(
        (status = 200, description = "Sensor updated", body = MessageResponse),
        (status = 401, description = "Admin authentication required"),
        (status = 404, description = "Sensor not found"),
    ),
    tag = "sensors"
)]
pub async fn update_sensor(
    admin: RequireAdmin,
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    JsonBody(body): JsonBody<UpdateSensorRequest>,
) -> AppResult<Json<MessageResponse>> {
    let mut changes = <sensor::ActiveModel as ActiveModelTrait>::default();
    if let Some(name) = body.sensor_name {
        changes.sensor_name = Set(name);
    }
    if let Some(category) = body.sensor_category {
        changes.sensor_category = Set(category);
    }
    if let Some(meta) = body.sensor_meta {
        changes.sensor_meta = Set(meta);
    }

    let matched = if changes.is_changed() {
        let txn = state.db.begin().await?;
        let result = sensor::Entity::update_many()
            .set(changes)
            .filter(sensor::Column::Id.eq(id))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        result.rows_affected
    } else {
        sensor::Entity::find_by_id(id).count(&state.db).await?
    };
    if matched == 0 {
        return Err(not_found());
    }

    tracing::info!(sensor_id = id, admin = %admin.username, "Sensor updated");
    Ok(Json(MessageResponse::new("Sensor actualizado")))
}

/// Delete a sensor
///
/// Readings already stored for the sensor are left in place.
#[utoipa::path(
    delete,
    path = "/api/v1/sensors/{id}",
    params(("id" = i32, Path, description = "Sensor id")),
    responses(
        (status = 200, description = "Sensor deleted", body = MessageResponse),
        (status = 401, description = "Admin authentication required"),
        (status = 404, description = "Sensor not found"),
    ),
    tag = "sensors"
)]
pub async fn delete_sensor(
    admin: RequireAdmin,
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<Json<MessageResponse>> {
    let txn = state.db.begin().await?;
    let result = sensor::Entity::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(not_found());
    }
    txn.commit().await?;

    tracing::info!(sensor_id = id, admin = %admin.username, "Sensor deleted");
    Ok(Json(MessageResponse::new("Sensor eliminado")))
}
