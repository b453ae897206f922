//! Market catalog endpoints

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{filter, ApiResponse};
use crate::catalog::{ConsumptionPoint, DistrictSummary, Market, RiskProfile, DEFAULT_REGION};
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct MarketQuery {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MarketList {
    pub markets: Vec<&'static Market>,
    pub total_count: usize,
}

#[derive(Debug, Serialize)]
pub struct MarketDetail {
    #[serde(flatten)]
    pub market: &'static Market,
    pub region: String,
    pub indicators: &'static RiskProfile,
}

#[derive(Debug, Default, Deserialize)]
pub struct TourismQuery {
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DistrictList {
    pub districts: Vec<DistrictSummary>,
    pub total_count: usize,
}

#[derive(Debug, Serialize)]
pub struct TourismTrend {
    pub region: String,
    pub trend_data: Vec<ConsumptionPoint>,
    pub total_months: usize,
}

/// GET /api/v1/markets?region=&district=
///
/// `district` takes precedence over `region`.
pub async fn list_markets(
    State(state): State<AppState>,
    query: Result<Query<MarketQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<MarketList>>> {
    let Query(query) = query?;
    let markets = match filter(&query.district) {
        Some(district) => state.catalog.markets_by_district(district),
        None => state.catalog.markets_in_region(filter(&query.region)),
    };

    Ok(ApiResponse::ok(MarketList {
        total_count: markets.len(),
        markets,
    }))
}

/// GET /api/v1/markets/:market_code
pub async fn get_market(
    State(state): State<AppState>,
    Path(market_code): Path<String>,
) -> ApiResult<Json<ApiResponse<MarketDetail>>> {
    let market = state.catalog.market(&market_code)?;
    let indicators = state.catalog.risk_profile(&market_code)?;

    Ok(ApiResponse::ok(MarketDetail {
        market,
        region: market.region(),
        indicators,
    }))
}

/// GET /api/v1/market-diagnosis/districts
pub async fn list_districts(State(state): State<AppState>) -> Json<ApiResponse<DistrictList>> {
    let districts = state.catalog.districts();
    ApiResponse::ok(DistrictList {
        total_count: districts.len(),
        districts,
    })
}

/// GET /api/v1/market-diagnosis/tourism-trend?region=
pub async fn tourism_trend(
    State(state): State<AppState>,
    query: Result<Query<TourismQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<TourismTrend>>> {
    let Query(query) = query?;
    let region = filter(&query.region).unwrap_or(DEFAULT_REGION);

    let trend_data = state.catalog.tourism_trend(region);
    if trend_data.is_empty() {
        return Err(ApiError::NotFound(format!(
            "관광 소비 데이터를 찾을 수 없습니다: {}",
            region
        )));
    }

    Ok(ApiResponse::ok(TourismTrend {
        region: region.to_string(),
        total_months: trend_data.len(),
        trend_data,
    }))
}

pub fn market_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/markets", get(list_markets))
        .route("/api/v1/markets/:market_code", get(get_market))
        .route("/api/v1/market-diagnosis/districts", get(list_districts))
        .route("/api/v1/market-diagnosis/tourism-trend", get(tourism_trend))
}
