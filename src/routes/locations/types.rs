use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::present;
use crate::entity::location;

#[derive(Debug, Serialize, ToSchema)]
pub struct LocationResponse {
    pub id: i32,
    pub company_id: i32,
    pub location_name: String,
    pub location_country: String,
    pub location_city: String,
    pub location_meta: Option<String>,
}

impl From<location::Model> for LocationResponse {
    fn from(l: location::Model) -> Self {
        Self {
            id: l.id,
            company_id: l.company_id,
            location_name: l.location_name,
            location_country: l.location_country,
            location_city: l.location_city,
            location_meta: l.location_meta,
        }
    }
}

/// Body for creating a location. Every key is required; `location_meta`
/// may be `null` but must be present.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLocationRequest {
    pub company_id: Option<i32>,
    pub location_name: Option<String>,
    pub location_country: Option<String>,
    pub location_city: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub location_meta: Option<Option<String>>,
}

/// Partial update; omitted keys keep their stored value.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLocationRequest {
    pub location_name: Option<String>,
    pub location_country: Option<String>,
    pub location_city: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub location_meta: Option<Option<String>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LocationCreatedResponse {
    pub message: String,
    pub id: i32,
}
