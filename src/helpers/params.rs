use chrono::{Local, NaiveDate};

use crate::errors::ApiError;

/// Parses a required integer identifier from a query or body value.
pub fn require_id(value: Option<&str>, name: &str) -> Result<i32, ApiError> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("{} is required", name)))?;
    raw.parse::<i32>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid {}: {}", name, raw)))
}

/// Blank strings count as missing.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// The server's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
