//! Request extractors that report failures as [`AppError`] JSON bodies
//! instead of axum's plain-text rejections.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use utoipa::IntoParams;

use crate::error::{AppError, AppResult};

/// JSON request body. Malformed or mistyped payloads become a 400.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!(reason = %e.body_text(), "Rejected request body");
            AppError::Validation("Cuerpo JSON inválido".to_string())
        })?;
        Ok(Self(value))
    }
}

/// Integer id taken from the `{id}` path segment.
///
/// Anything that is not an integer does not name a resource, so it is a 404.
#[derive(Debug, Clone, Copy)]
pub struct ResourceId(pub i32);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("Recurso no encontrado".to_string()))?;
        Ok(Self(id))
    }
}

/// `company_api_key` query parameter.
///
/// Most read endpoints only check that the key is present; it is neither
/// looked up nor used to scope results.
#[derive(Debug, Deserialize, IntoParams)]
pub struct CompanyKeyQuery {
    /// Company API key (presence is required)
    pub company_api_key: Option<String>,
}

impl CompanyKeyQuery {
    pub fn require(&self) -> AppResult<&str> {
        match self.company_api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(AppError::missing("company_api_key")),
        }
    }
}

/// Unwrap a required field, reporting it by name when absent.
pub fn required<T>(value: Option<T>, field: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::missing(field))
}

/// Deserialize a field so that an absent key (`None`) can be told apart from
/// an explicit `null` (`Some(None)`). Use with `#[serde(default)]`.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
