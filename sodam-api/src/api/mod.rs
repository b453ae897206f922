//! HTTP API handlers for sodam-api
//!
//! Successful responses share one envelope:
//! `{"success": true, "data": ..., "message"?: ..., "timestamp": RFC 3339}`.

pub mod buildinfo;
pub mod diagnosis;
pub mod health;
pub mod map;
pub mod markets;
pub mod risk;
pub mod scoring;
pub mod strategy;
pub mod support;

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub use buildinfo::get_build_info;
pub use diagnosis::diagnosis_routes;
pub use health::health_routes;
pub use map::map_routes;
pub use markets::market_routes;
pub use risk::risk_routes;
pub use scoring::scoring_routes;
pub use strategy::strategy_routes;
pub use support::support_routes;

/// Success envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
            message: None,
            timestamp: Utc::now(),
        })
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            data,
            message: Some(message.into()),
            timestamp: Utc::now(),
        })
    }
}

/// Blank and `전체` query values mean "no filter"
pub(crate) fn filter(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "전체")
}
