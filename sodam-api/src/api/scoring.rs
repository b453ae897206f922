//! Location scoring endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::info;

use super::ApiResponse;
use crate::services::scoring::{
    Comparison, ComparisonParams, DetailedRecommendations, LocationScore, ScoringParams,
    ScoringService,
};
use crate::{ApiResult, AppState};

/// POST /api/v1/scoring/calculate
pub async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<ScoringParams>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<LocationScore>>> {
    let Json(params) = payload?;
    let score = ScoringService::new(state.catalog).calculate(&params)?;

    info!(
        industry = %params.industry,
        region = %params.region,
        total_score = score.total_score,
        "Location score calculated"
    );
    Ok(ApiResponse::ok(score))
}

/// POST /api/v1/scoring/compare
pub async fn compare(
    State(state): State<AppState>,
    payload: Result<Json<ComparisonParams>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<Comparison>>> {
    let Json(params) = payload?;
    let comparison = ScoringService::new(state.catalog).compare(&params)?;
    Ok(ApiResponse::ok(comparison))
}

/// POST /api/v1/scoring/recommendations
pub async fn recommendations(
    State(state): State<AppState>,
    payload: Result<Json<ScoringParams>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<DetailedRecommendations>>> {
    let Json(params) = payload?;
    let recommendations = ScoringService::new(state.catalog).detailed_recommendations(&params)?;
    Ok(ApiResponse::ok(recommendations))
}

pub fn scoring_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/scoring/calculate", post(calculate))
        .route("/api/v1/scoring/compare", post(compare))
        .route("/api/v1/scoring/recommendations", post(recommendations))
}
