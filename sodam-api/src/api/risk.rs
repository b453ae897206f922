//! Risk classification endpoints
//!
//! Every classification is written to `risk_analyses` before it is returned,
//! so `history` replays exactly what clients saw.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sodam_common::db::RiskAnalysisRecord;
use tracing::info;

use super::{filter, ApiResponse};
use crate::db::risk_analyses;
use crate::services::risk::{
    self, DetailParams, MitigationGroup, RiskClassification, RiskDetail, RiskService, RiskType,
    RiskTypeInfo,
};
use crate::{ApiError, ApiResult, AppState};

const DEFAULT_HISTORY_LIMIT: u32 = 10;
const MAX_HISTORY_LIMIT: u32 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub industry: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MitigationQuery {
    #[serde(default)]
    pub risk_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct RiskHistory {
    pub market_code: String,
    pub analyses: Vec<RiskAnalysisRecord>,
    pub total_count: usize,
}

/// POST /api/v1/risk-classification/classify/:market_code
///
/// The body is optional; an empty body classifies without an industry.
pub async fn classify(
    State(state): State<AppState>,
    Path(market_code): Path<String>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<RiskClassification>>> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => ClassifyRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };

    let classification = RiskService::new(state.catalog).classify(
        &market_code,
        request.industry.as_deref(),
        Utc::now(),
    )?;
    risk_analyses::save_analysis(&state.db, &classification.to_record()?).await?;

    info!(
        market_code = %market_code,
        risk_type = %classification.primary_risk_type,
        risk_score = classification.primary_risk_score,
        "Risk classification stored"
    );
    Ok(ApiResponse::ok(classification))
}

/// POST /api/v1/risk-classification/detailed-analysis/:market_code
pub async fn detailed_analysis(
    State(state): State<AppState>,
    Path(market_code): Path<String>,
    payload: Result<Json<DetailParams>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<RiskDetail>>> {
    let Json(params) = payload?;
    let risk_type: RiskType = params.risk_type.parse()?;
    let detail = RiskService::new(state.catalog).detailed_analysis(
        &market_code,
        risk_type,
        params.industry.as_deref(),
    )?;
    Ok(ApiResponse::ok(detail))
}

/// GET /api/v1/risk-classification/risk-types
pub async fn risk_types() -> Json<ApiResponse<Vec<RiskTypeInfo>>> {
    ApiResponse::ok(risk::risk_types())
}

/// GET /api/v1/risk-classification/mitigation-strategies?risk_type=
pub async fn mitigation_strategies(
    query: Result<Query<MitigationQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<Vec<MitigationGroup>>>> {
    let Query(query) = query?;
    let risk_type = filter(&query.risk_type)
        .map(str::parse::<RiskType>)
        .transpose()?;
    Ok(ApiResponse::ok(risk::mitigation_strategies(risk_type)))
}

/// GET /api/v1/risk-classification/history/:market_code?limit=
pub async fn history(
    State(state): State<AppState>,
    Path(market_code): Path<String>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<RiskHistory>>> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    if limit == 0 || limit > MAX_HISTORY_LIMIT {
        return Err(ApiError::BadRequest(format!(
            "limit must be between 1 and {}",
            MAX_HISTORY_LIMIT
        )));
    }

    state.catalog.market(&market_code)?;
    let analyses = risk_analyses::list_for_market(&state.db, &market_code, limit).await?;

    Ok(ApiResponse::ok(RiskHistory {
        market_code,
        total_count: analyses.len(),
        analyses,
    }))
}

pub fn risk_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/risk-classification/classify/:market_code", post(classify))
        .route(
            "/api/v1/risk-classification/detailed-analysis/:market_code",
            post(detailed_analysis),
        )
        .route("/api/v1/risk-classification/risk-types", get(risk_types))
        .route(
            "/api/v1/risk-classification/mitigation-strategies",
            get(mitigation_strategies),
        )
        .route("/api/v1/risk-classification/history/:market_code", get(history))
}
