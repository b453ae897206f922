//! Core diagnosis endpoints
//!
//! GET endpoints take `industry` and `period_months` as query parameters; the
//! health-score and comprehensive endpoints take a JSON body.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use super::ApiResponse;
use crate::services::diagnosis::{
    BusinessRatesAnalysis, CardSalesAnalysis, ComprehensiveDiagnosis, DiagnosisService,
    DwellTimeAnalysis, FootTrafficAnalysis, HealthScore, HealthScoreParams, SameIndustryAnalysis,
};
use crate::{ApiResult, AppState};

const DEFAULT_PERIOD_MONTHS: usize = 12;

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default = "default_period")]
    pub period_months: usize,
}

fn default_period() -> usize {
    DEFAULT_PERIOD_MONTHS
}

#[derive(Debug, Deserialize)]
pub struct IndustryQuery {
    #[serde(default)]
    pub industry: Option<String>,
}

/// GET /api/v1/core-diagnosis/foot-traffic/:market_code
pub async fn foot_traffic(
    State(state): State<AppState>,
    Path(market_code): Path<String>,
    query: Result<Query<TrendQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<FootTrafficAnalysis>>> {
    let Query(query) = query?;
    let analysis = DiagnosisService::new(state.catalog).foot_traffic(
        &market_code,
        query.industry.as_deref(),
        query.period_months,
    )?;
    Ok(ApiResponse::ok(analysis))
}

/// GET /api/v1/core-diagnosis/card-sales/:market_code
pub async fn card_sales(
    State(state): State<AppState>,
    Path(market_code): Path<String>,
    query: Result<Query<TrendQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<CardSalesAnalysis>>> {
    let Query(query) = query?;
    let analysis = DiagnosisService::new(state.catalog).card_sales(
        &market_code,
        query.industry.as_deref(),
        query.period_months,
    )?;
    Ok(ApiResponse::ok(analysis))
}

/// GET /api/v1/core-diagnosis/same-industry/:market_code
pub async fn same_industry(
    State(state): State<AppState>,
    Path(market_code): Path<String>,
    query: Result<Query<IndustryQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<SameIndustryAnalysis>>> {
    let Query(query) = query?;
    let analysis = DiagnosisService::new(state.catalog)
        .same_industry(&market_code, query.industry.as_deref())?;
    Ok(ApiResponse::ok(analysis))
}

/// GET /api/v1/core-diagnosis/business-rates/:market_code
pub async fn business_rates(
    State(state): State<AppState>,
    Path(market_code): Path<String>,
) -> ApiResult<Json<ApiResponse<BusinessRatesAnalysis>>> {
    let analysis = DiagnosisService::new(state.catalog).business_rates(&market_code)?;
    Ok(ApiResponse::ok(analysis))
}

/// GET /api/v1/core-diagnosis/dwell-time/:market_code
pub async fn dwell_time(
    State(state): State<AppState>,
    Path(market_code): Path<String>,
) -> ApiResult<Json<ApiResponse<DwellTimeAnalysis>>> {
    let analysis = DiagnosisService::new(state.catalog).dwell_time(&market_code)?;
    Ok(ApiResponse::ok(analysis))
}

/// POST /api/v1/core-diagnosis/health-score/:market_code
pub async fn health_score(
    State(state): State<AppState>,
    Path(market_code): Path<String>,
    payload: Result<Json<HealthScoreParams>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<HealthScore>>> {
    let Json(params) = payload?;
    let score = DiagnosisService::new(state.catalog).health_score(&market_code, &params)?;

    info!(
        market_code = %market_code,
        industry = ?params.industry,
        total_score = score.total_score,
        "Health score calculated"
    );
    Ok(ApiResponse::ok(score))
}

/// POST /api/v1/core-diagnosis/comprehensive/:market_code
pub async fn comprehensive(
    State(state): State<AppState>,
    Path(market_code): Path<String>,
    payload: Result<Json<HealthScoreParams>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<ComprehensiveDiagnosis>>> {
    let Json(params) = payload?;
    let diagnosis = DiagnosisService::new(state.catalog).comprehensive(&market_code, &params)?;
    Ok(ApiResponse::with_message(diagnosis, "종합 진단이 완료되었습니다"))
}

pub fn diagnosis_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/core-diagnosis/foot-traffic/:market_code", get(foot_traffic))
        .route("/api/v1/core-diagnosis/card-sales/:market_code", get(card_sales))
        .route("/api/v1/core-diagnosis/same-industry/:market_code", get(same_industry))
        .route("/api/v1/core-diagnosis/business-rates/:market_code", get(business_rates))
        .route("/api/v1/core-diagnosis/dwell-time/:market_code", get(dwell_time))
        .route("/api/v1/core-diagnosis/health-score/:market_code", post(health_score))
        .route("/api/v1/core-diagnosis/comprehensive/:market_code", post(comprehensive))
}
