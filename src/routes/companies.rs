use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{ActiveModelTrait, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::RequireAdmin;
use crate::common::{required, AppState, JsonBody};
use crate::entity::company;
use crate::error::AppResult;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCompanyRequest {
    pub company_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyCreatedResponse {
    pub message: String,
    pub id: i32,
    /// Shown only once; it cannot be retrieved later
    pub company_api_key: String,
}

/// Register a company
#[utoipa::path(
    post,
    path = "/api/v1/companies",
    request_body = CreateCompanyRequest,
    responses(
        (status = 201, description = "Company created", body = CompanyCreatedResponse),
        (status = 400, description = "Missing company_name"),
        (status = 401, description = "Admin authentication required"),
    ),
    tag = "companies"
)]
pub async fn create_company(
    admin: RequireAdmin,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateCompanyRequest>,
) -> AppResult<(StatusCode, Json<CompanyCreatedResponse>)> {
    let company_name = required(body.company_name, "company_name")?;
    let company_api_key = Uuid::new_v4().to_string();

    let txn = state.db.begin().await?;
    let created = company::ActiveModel {
        company_name: Set(company_name),
        company_api_key: Set(company_api_key.clone()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(company_id = created.id, admin = %admin.username, "Company created");

    Ok((
        StatusCode::CREATED,
        Json(CompanyCreatedResponse {
            message: "Compañía creada".to_string(),
            id: created.id,
            company_api_key,
        }),
    ))
}
