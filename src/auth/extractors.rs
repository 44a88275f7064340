use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// Outcome of the per-request credential check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AdminAuth {
    #[default]
    Anonymous,
    Admin { username: String },
}

/// Route guard for admin-only handlers.
///
/// Place it first in the handler's argument list so it rejects before any
/// path, query or body validation.
#[derive(Debug, Clone)]
pub struct RequireAdmin {
    pub username: String,
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AdminAuth>() {
            Some(AdminAuth::Admin { username }) => Ok(Self {
                username: username.clone(),
            }),
            _ => Err(AppError::AuthenticationRequired),
        }
    }
}
