use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::verify_admin;
use crate::common::{AppState, JsonBody};
use crate::error::{AppError, AppResult};
use crate::routes::types::MessageResponse;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Check admin credentials
///
/// No session is issued; protected endpoints expect Basic credentials on
/// every call.
#[utoipa::path(
    post,
    path = "/api/v1/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = MessageResponse),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "admin"
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> AppResult<Json<MessageResponse>> {
    let (Some(username), Some(password)) = (body.username, body.password) else {
        return Err(AppError::InvalidCredentials);
    };

    if !verify_admin(&state.db, &username, &password).await? {
        tracing::debug!(username = %username, "Admin login rejected");
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!(username = %username, "Admin login");
    Ok(Json(MessageResponse::new("Inicio de sesión exitoso")))
}
