//! Strategy card endpoints

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

use super::{filter, ApiResponse};
use crate::services::risk::RiskType;
use crate::services::strategy::{
    self, Checklist, DifficultyLevel, GenerateRequest, StrategyCaseList, StrategyCards,
    StrategyCategory, TemplateList,
};
use crate::{ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct CaseQuery {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub strategy_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TemplateQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

/// POST /api/v1/strategy-cards/generate
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<StrategyCards>>> {
    let Json(request) = payload?;
    state.catalog.market(&request.market_code)?;
    let risk_type: RiskType = request.risk_type.parse()?;

    let cards = strategy::generate(
        &request.market_code,
        &request.industry,
        risk_type,
        &request.user_profile,
    );

    info!(
        market_code = %request.market_code,
        risk_type = %risk_type,
        cards = cards.total_strategies,
        "Strategy cards generated"
    );
    Ok(ApiResponse::ok(cards))
}

/// GET /api/v1/strategy-cards/checklist/:strategy_id
pub async fn checklist(Path(strategy_id): Path<String>) -> ApiResult<Json<ApiResponse<Checklist>>> {
    Ok(ApiResponse::ok(strategy::checklist(&strategy_id)?))
}

/// GET /api/v1/strategy-cards/success-cases
pub async fn success_cases(
    query: Result<Query<CaseQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<StrategyCaseList>>> {
    let Query(query) = query?;
    Ok(ApiResponse::ok(strategy::success_cases(
        filter(&query.industry),
        filter(&query.strategy_type),
    )))
}

/// GET /api/v1/strategy-cards/templates
pub async fn templates(
    query: Result<Query<TemplateQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<TemplateList>>> {
    let Query(query) = query?;
    Ok(ApiResponse::ok(strategy::templates(
        filter(&query.category),
        filter(&query.difficulty),
    )))
}

/// GET /api/v1/strategy-cards/categories
pub async fn categories() -> Json<ApiResponse<Vec<StrategyCategory>>> {
    ApiResponse::ok(strategy::categories())
}

/// GET /api/v1/strategy-cards/difficulty-levels
pub async fn difficulty_levels() -> Json<ApiResponse<Vec<DifficultyLevel>>> {
    ApiResponse::ok(strategy::difficulty_levels())
}

pub fn strategy_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/strategy-cards/generate", post(generate))
        .route("/api/v1/strategy-cards/checklist/:strategy_id", get(checklist))
        .route("/api/v1/strategy-cards/success-cases", get(success_cases))
        .route("/api/v1/strategy-cards/templates", get(templates))
        .route("/api/v1/strategy-cards/categories", get(categories))
        .route("/api/v1/strategy-cards/difficulty-levels", get(difficulty_levels))
}
