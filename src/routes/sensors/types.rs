use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::present;
use crate::entity::sensor;

/// Sensor as listed to consumers. The API key is only shown on creation.
#[derive(Debug, Serialize, ToSchema)]
pub struct SensorResponse {
    pub id: i32,
    pub location_id: i32,
    pub sensor_name: String,
    pub sensor_category: String,
    pub sensor_meta: Option<String>,
}

impl From<sensor::Model> for SensorResponse {
    fn from(s: sensor::Model) -> Self {
        Self {
            id: s.id,
            location_id: s.location_id,
            sensor_name: s.sensor_name,
            sensor_category: s.sensor_category,
            sensor_meta: s.sensor_meta,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSensorRequest {
    pub location_id: Option<i32>,
    pub sensor_name: Option<String>,
    pub sensor_category: Option<String>,
    /// Must be present, may be `null`
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub sensor_meta: Option<Option<String>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSensorRequest {
    pub sensor_name: Option<String>,
    pub sensor_category: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub sensor_meta: Option<Option<String>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SensorCreatedResponse {
    pub message: String,
    pub id: i32,
    pub sensor_api_key: String,
}
