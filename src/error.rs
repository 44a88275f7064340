use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// A required body field or query parameter was absent.
    pub fn missing(field: &str) -> Self {
        Self::MissingParameter(format!("Falta {field}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::Database(e) => {
                tracing::error!("Database error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno del servidor".to_string(),
                )
            }
            Self::MissingParameter(msg) | Self::InvalidApiKey(msg) | Self::Validation(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            Self::AuthenticationRequired => (
                StatusCode::UNAUTHORIZED,
                "Autenticación requerida".to_string(),
            ),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Credenciales inválidas".to_string(),
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
