//! sodam-api library interface
//!
//! Commercial-district (상권) diagnosis service: the compiled-in reference
//! catalog, the scoring services built on it, and the axum handlers that
//! expose them. Exposed as a library so integration tests can drive the
//! router directly.

pub mod api;
pub mod catalog;
pub mod db;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::catalog::Catalog;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// History and booking tables
    pub db: SqlitePool,
    /// Read-only reference data
    pub catalog: &'static Catalog,
    /// Service startup timestamp for uptime reporting
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            catalog: Catalog::builtin(),
            started_at: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .merge(api::market_routes())
        .merge(api::diagnosis_routes())
        .merge(api::scoring_routes())
        .merge(api::risk_routes())
        .merge(api::strategy_routes())
        .merge(api::support_routes())
        .merge(api::map_routes())
        .merge(api::health_routes())
        .route("/api/buildinfo", get(api::get_build_info))
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn route_not_found(uri: axum::http::Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
