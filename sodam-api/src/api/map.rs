//! Map visualization endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::{filter, ApiResponse};
use crate::services::map::{
    analysis_types, Accessibility, AnalysisTypes, ClusterAnalysis, ClusterType, Heatmap,
    HeatmapType, MapService, RadiusAnalysis, RadiusType, RegionList, TimePeriod, TrafficFlow,
};
use crate::{ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct HeatmapQuery {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub analysis_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClusterQuery {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub cluster_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrafficQuery {
    #[serde(default)]
    pub time_period: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RadiusRequest {
    pub center_lat: f64,
    pub center_lng: f64,
    pub radius_km: f64,
    #[serde(default)]
    pub analysis_type: Option<String>,
}

/// GET /api/v1/map-visualization/heatmap?region=&analysis_type=
pub async fn heatmap(
    State(state): State<AppState>,
    query: Result<Query<HeatmapQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<Heatmap>>> {
    let Query(query) = query?;
    let analysis_type = match query.analysis_type.as_deref() {
        Some(kind) => kind.parse::<HeatmapType>()?,
        None => HeatmapType::HealthScore,
    };

    let heatmap = MapService::new(state.catalog).heatmap(filter(&query.region), analysis_type);
    Ok(ApiResponse::ok(heatmap))
}

/// POST /api/v1/map-visualization/radius-analysis
pub async fn radius_analysis(
    State(state): State<AppState>,
    payload: Result<Json<RadiusRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<RadiusAnalysis>>> {
    let Json(request) = payload?;
    let analysis_type = match request.analysis_type.as_deref() {
        Some(kind) => kind.parse::<RadiusType>()?,
        None => RadiusType::Comprehensive,
    };

    let analysis = MapService::new(state.catalog).radius_analysis(
        request.center_lat,
        request.center_lng,
        request.radius_km,
        analysis_type,
    )?;
    Ok(ApiResponse::ok(analysis))
}

/// GET /api/v1/map-visualization/cluster-analysis?region=&cluster_type=
pub async fn cluster_analysis(
    State(state): State<AppState>,
    query: Result<Query<ClusterQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<ClusterAnalysis>>> {
    let Query(query) = query?;
    let cluster_type = match query.cluster_type.as_deref() {
        Some(kind) => kind.parse::<ClusterType>()?,
        None => ClusterType::Performance,
    };

    let analysis =
        MapService::new(state.catalog).cluster_analysis(filter(&query.region), cluster_type);
    Ok(ApiResponse::ok(analysis))
}

/// GET /api/v1/map-visualization/traffic-flow/:market_code?time_period=
pub async fn traffic_flow(
    State(state): State<AppState>,
    Path(market_code): Path<String>,
    query: Result<Query<TrafficQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<TrafficFlow>>> {
    let Query(query) = query?;
    let time_period = match query.time_period.as_deref() {
        Some(period) => period.parse::<TimePeriod>()?,
        None => TimePeriod::Daily,
    };

    let flow = MapService::new(state.catalog).traffic_flow(&market_code, time_period)?;
    Ok(ApiResponse::ok(flow))
}

/// GET /api/v1/map-visualization/accessibility/:market_code
pub async fn accessibility(
    State(state): State<AppState>,
    Path(market_code): Path<String>,
) -> ApiResult<Json<ApiResponse<Accessibility>>> {
    let analysis = MapService::new(state.catalog).accessibility(&market_code)?;
    Ok(ApiResponse::ok(analysis))
}

/// GET /api/v1/map-visualization/analysis-types
pub async fn list_analysis_types() -> Json<ApiResponse<AnalysisTypes>> {
    ApiResponse::ok(analysis_types())
}

/// GET /api/v1/map-visualization/regions
pub async fn regions(State(state): State<AppState>) -> Json<ApiResponse<RegionList>> {
    ApiResponse::ok(MapService::new(state.catalog).regions())
}

pub fn map_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/map-visualization/heatmap", get(heatmap))
        .route("/api/v1/map-visualization/radius-analysis", post(radius_analysis))
        .route("/api/v1/map-visualization/cluster-analysis", get(cluster_analysis))
        .route(
            "/api/v1/map-visualization/traffic-flow/:market_code",
            get(traffic_flow),
        )
        .route(
            "/api/v1/map-visualization/accessibility/:market_code",
            get(accessibility),
        )
        .route("/api/v1/map-visualization/analysis-types", get(list_analysis_types))
        .route("/api/v1/map-visualization/regions", get(regions))
}
