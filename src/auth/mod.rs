//! Admin authentication.
//!
//! [`middleware::authenticate`] checks HTTP Basic credentials once per
//! request and records the outcome as an [`AdminAuth`] extension. Handlers
//! that mutate the registry take a [`RequireAdmin`] argument, which rejects
//! with 401 before the handler body runs.

mod basic;
mod extractors;
pub mod middleware;

pub use basic::{parse_basic_header, BasicCredentials};
pub use extractors::{AdminAuth, RequireAdmin};

use sea_orm::{ConnectionTrait, DbErr, EntityTrait};

use crate::entity::admin;

/// Check a username/password pair against the `admin` table.
///
/// Exact, case-sensitive comparison against the stored plaintext password.
pub async fn verify_admin<C>(db: &C, username: &str, password: &str) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    let found = admin::Entity::find_by_id(username.to_string()).one(db).await?;
    Ok(found.is_some_and(|a| a.password == password))
}
