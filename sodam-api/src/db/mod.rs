//! Persistence helpers for the service tables
//!
//! Schema lives in `sodam_common::db::init`; these modules only read and write
//! rows.

pub mod consultations;
pub mod risk_analyses;

use chrono::{DateTime, Utc};
use sodam_common::{Error, Result};
use uuid::Uuid;

pub(crate) fn parse_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("Failed to parse {}: {}", column, e)))
}

pub(crate) fn parse_id(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| Error::Internal(format!("Invalid row id {}: {}", value, e)))
}
