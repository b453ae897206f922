//! Persisted row models
//!
//! Structured payloads are stored as JSON text columns and timestamps as
//! RFC 3339 strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One risk classification run for a market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAnalysisRecord {
    pub id: Uuid,
    pub market_code: String,
    pub industry: Option<String>,
    /// Primary archetype label (e.g. `과포화 경쟁형`)
    pub risk_type: String,
    pub risk_score: f64,
    pub health_score: Option<f64>,
    /// Full classification result as returned to the client
    pub analysis_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Expert consultation booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationRecord {
    pub id: Uuid,
    pub expert_id: String,
    pub requester_name: String,
    pub contact: Option<String>,
    pub consultation_type: String,
    pub preferred_time: Option<String>,
    pub message: Option<String>,
    /// `requested` until an expert picks it up
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl ConsultationRecord {
    pub const STATUS_REQUESTED: &'static str = "requested";
}
