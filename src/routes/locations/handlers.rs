use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::auth::RequireAdmin;
use crate::common::{required, AppState, CompanyKeyQuery, JsonBody, ResourceId};
use crate::entity::location;
use crate::error::{AppError, AppResult};
use crate::routes::types::MessageResponse;

use super::types::{
    CreateLocationRequest, LocationCreatedResponse, LocationResponse, UpdateLocationRequest,
};

fn not_found() -> AppError {
    AppError::NotFound("Ubicación no encontrada".to_string())
}

/// Create a location
#[utoipa::path(
    post,
    path = "/api/v1/locations",
    request_body = CreateLocationRequest,
    responses(
        (status = 201, description = "Location created", body = LocationCreatedResponse),
        (status = 400, description = "Missing field or malformed body"),
        (status = 401, description = "Admin authentication required"),
    ),
    tag = "locations"
)]
pub async fn create_location(
    admin: RequireAdmin,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateLocationRequest>,
) -> AppResult<(StatusCode, Json<LocationCreatedResponse>)> {
    let company_id = required(body.company_id, "company_id")?;
    let location_name = required(body.location_name, "location_name")?;
    let location_country = required(body.location_country, "location_country")?;
    let location_city = required(body.location_city, "location_city")?;
    let location_meta = required(body.location_meta, "location_meta")?;

    let txn = state.db.begin().await?;
    let created = location::ActiveModel {
        company_id: Set(company_id),
        location_name: Set(location_name),
        location_country: Set(location_country),
        location_city: Set(location_city),
        location_meta: Set(location_meta),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(
        location_id = created.id,
        company_id,
        admin = %admin.username,
        "Location created"
    );

    Ok((
        StatusCode::CREATED,
        Json(LocationCreatedResponse {
            message: "Ubicación creada".to_string(),
            id: created.id,
        }),
    ))
}

/// List all locations
///
/// `company_api_key` must be present but does not filter the result.
#[utoipa::path(
    get,
    path = "/api/v1/locations",
    params(CompanyKeyQuery),
    responses(
        (status = 200, description = "Locations retrieved successfully", body = Vec<LocationResponse>),
        (status = 400, description = "Missing company_api_key"),
    ),
    tag = "locations"
)]
pub async fn list_locations(
    State(state): State<AppState>,
    Query(query): Query<CompanyKeyQuery>,
) -> AppResult<Json<Vec<LocationResponse>>> {
    query.require()?;

    let locations = location::Entity::find()
        .order_by_asc(location::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(locations.into_iter().map(LocationResponse::from).collect()))
}

/// Get a location by id
#[utoipa::path(
    get,
    path = "/api/v1/locations/{id}",
    params(
        ("id" = i32, Path, description = "Location id"),
        CompanyKeyQuery,
    ),
    responses(
        (status = 200, description = "Location retrieved successfully", body = LocationResponse),
        (status = 400, description = "Missing company_api_key"),
        (status = 404, description = "Location not found"),
    ),
    tag = "locations"
)]
pub async fn get_location(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    Query(query): Query<CompanyKeyQuery>,
) -> AppResult<Json<LocationResponse>> {
    query.require()?;

    let found = location::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(found.into()))
}

/// Update a location
///
/// Keys left out of the body keep their current value.
#[utoipa::path(
    put,
    path = "/api/v1/locations/{id}",
    params(("id" = i32, Path, description = "Location id")),
    request_body = UpdateLocationRequest,
    responses(
        (status = 200, description = "Location updated", body = MessageResponse),
        (status = 401, description = "Admin authentication required"),
        (status = 404, description = "Location not found"),
    ),
    tag = "locations"
)]
pub async fn update_location(
    admin: RequireAdmin,
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    JsonBody(body): JsonBody<UpdateLocationRequest>,
) -> AppResult<Json<MessageResponse>> {
    let mut changes = <location::ActiveModel as ActiveModelTrait>::default();
    if let Some(name) = body.location_name {
        changes.location_name = Set(name);
    }
    if let Some(country) = body.location_country {
        changes.location_country = Set(country);
    }
    if let Some(city) = body.location_city {
        changes.location_city = Set(city);
    }
    if let Some(meta) = body.location_meta {
        changes.location_meta = Set(meta);
    }

    // A single filtered UPDATE both writes and reports whether the row exists
    let matched = if changes.is_changed() {
        let txn = state.db.begin().await?;
        let result = location::Entity::update_many()
            .set(changes)
            .filter(location::Column::Id.eq(id))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        result.rows_affected
    } else {
        location::Entity::find_by_id(id).count(&state.db).await?
    };
    if matched == 0 {
        return Err(not_found());
    }

    tracing::info!(location_id = id, admin = %admin.username, "Location updated");
    Ok(Json(MessageResponse::new("Ubicación actualizada")))
}

/// Delete a location
///
/// Sensors attached to the location are left in place.
#[utoipa::path(
    delete,
    path = "/api/v1/locations/{id}",
    params(("id" = i32, Path, description = "Location id")),
    responses(
        (status = 200, description = "Location deleted", body = MessageResponse),
        (status = 401, description = "Admin authentication required"),
        (status = 404, description = "Location not found"),
    ),
    tag = "locations"
)]
pub async fn delete_location(
    admin: RequireAdmin,
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<Json<MessageResponse>> {
    let txn = state.db.begin().await?;
    let result = location::Entity::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(not_found());
    }
    txn.commit().await?;

    tracing::info!(location_id = id, admin = %admin.username, "Location deleted");
    Ok(Json(MessageResponse::new("Ubicación eliminada")))
}
