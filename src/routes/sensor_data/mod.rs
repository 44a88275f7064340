mod handlers;
mod params;
mod types;

pub use handlers::{delete_sensor_data, get_sensor_data, ingest_sensor_data, query_sensor_data};
pub use types::{
    IngestRequest, IngestResponse, ReadingResponse, SensorDataDetailResponse, SensorDataQuery,
    SensorDataResponse,
};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_delete_sensor_data, __path_get_sensor_data, __path_ingest_sensor_data,
    __path_query_sensor_data,
};
