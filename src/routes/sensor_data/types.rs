use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::entity::sensor_data;

/// Batch of readings pushed by a device
#[derive(Debug, Deserialize, ToSchema)]
pub struct IngestRequest {
    /// The sensor's own API key
    pub api_key: Option<String>,
    /// One entry per measurement, stored as-is
    #[schema(value_type = Option<Vec<Object>>)]
    pub json_data: Option<Vec<Value>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IngestResponse {
    pub message: String,
    /// Number of readings stored
    pub count: usize,
}

/// Range query parameters. All four are required; they are kept optional
/// here so that absence maps to a JSON 400 rather than an extractor error.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SensorDataQuery {
    /// Company API key, validated against the registry
    pub company_api_key: Option<String>,
    /// Inclusive lower bound, seconds since epoch
    pub from: Option<String>,
    /// Inclusive upper bound, seconds since epoch
    pub to: Option<String>,
    /// Comma-separated sensor ids, e.g. `1,2,5`
    pub sensor_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReadingResponse {
    pub sensor_id: i32,
    #[schema(value_type = Object)]
    pub json_data: Value,
    pub timestamp: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SensorDataResponse {
    pub data: Vec<ReadingResponse>,
    /// Requested ids with no matching sensor; omitted when empty
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sensores_no_existentes: Vec<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SensorDataDetailResponse {
    pub id: i32,
    pub sensor_id: i32,
    #[schema(value_type = Object)]
    pub json_data: Value,
    pub timestamp: i64,
}

impl From<sensor_data::Model> for ReadingResponse {
    fn from(d: sensor_data::Model) -> Self {
        Self {
            sensor_id: d.sensor_id,
            json_data: d.json_data,
            timestamp: d.timestamp,
        }
    }
}

impl From<sensor_data::Model> for SensorDataDetailResponse {
    fn from(d: sensor_data::Model) -> Self {
        Self {
            id: d.id,
            sensor_id: d.sensor_id,
            json_data: d.json_data,
            timestamp: d.timestamp,
        }
    }
}
