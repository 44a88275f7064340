use crate::error::{AppError, AppResult};

/// Parse `sensor_id=1, 2,3` into ids. Every item must be an integer.
pub fn parse_sensor_ids(raw: &str) -> AppResult<Vec<i64>> {
    raw.split(',')
        .map(|item| item.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| AppError::Validation("Parámetro sensor_id inválido".to_string()))
}

/// Parse a `from`/`to` bound in seconds since epoch.
pub fn parse_timestamp(raw: &str) -> AppResult<i64> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Validation("Parámetros de tiempo inválidos".to_string()))
}

/// Treat empty strings like absent parameters.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
