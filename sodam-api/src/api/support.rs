//! Support tool endpoints: centers, experts, policies, policy applications,
//! local cases and consultation bookings

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use sodam_common::db::ConsultationRecord;
use tracing::info;
use uuid::Uuid;

use super::{filter, ApiResponse};
use crate::db::consultations;
use crate::services::strategy::UserProfile;
use crate::services::support::{
    self, ApplicationStatus, Booking, BookingRequest, ExpertList, ExpertiseAreaList,
    LocalCaseList, PolicyApplication, PolicyApplicationRequest, PolicyRecommendations,
    ServiceTypeList, SupportCenterList,
};
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct CenterQuery {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExpertQuery {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub expertise: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LocalCaseQuery {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub strategy_type: Option<String>,
}

/// GET /api/v1/support-tools/support-centers
pub async fn support_centers(
    query: Result<Query<CenterQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<SupportCenterList>>> {
    let Query(query) = query?;
    Ok(ApiResponse::ok(support::support_centers(
        filter(&query.region),
        filter(&query.service_type),
    )))
}

/// GET /api/v1/support-tools/expert-consultation
pub async fn expert_consultation(
    query: Result<Query<ExpertQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<ExpertList>>> {
    let Query(query) = query?;
    Ok(ApiResponse::ok(support::experts(
        filter(&query.region),
        filter(&query.expertise),
    )))
}

/// POST /api/v1/support-tools/policy-recommendations
///
/// The body is the owner profile itself.
pub async fn policy_recommendations(
    payload: Result<Json<UserProfile>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<PolicyRecommendations>>> {
    let Json(profile) = payload?;
    let today = Utc::now().date_naive();
    Ok(ApiResponse::ok(support::policy_recommendations(&profile, today)))
}

/// GET /api/v1/support-tools/success-cases
pub async fn success_cases(
    query: Result<Query<LocalCaseQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<LocalCaseList>>> {
    let Query(query) = query?;
    Ok(ApiResponse::ok(support::success_cases(
        filter(&query.industry),
        filter(&query.region),
        filter(&query.strategy_type),
    )))
}

/// POST /api/v1/support-tools/policy-application
pub async fn apply_policy(
    payload: Result<Json<PolicyApplicationRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<PolicyApplication>>)> {
    let Json(request) = payload?;
    let application = support::apply_for_policy(request, Utc::now())?;

    info!(
        application_id = %application.application_id,
        policy_id = application.policy_id,
        missing_documents = application.missing_documents.len(),
        "Policy application received"
    );
    let message = match application.status {
        ApplicationStatus::Submitted => "정책 신청이 접수되었습니다.",
        ApplicationStatus::Incomplete => "정책 신청이 접수되었으나 서류 보완이 필요합니다.",
    };
    Ok((StatusCode::CREATED, ApiResponse::with_message(application, message)))
}

/// GET /api/v1/support-tools/service-types
pub async fn service_types() -> Json<ApiResponse<ServiceTypeList>> {
    ApiResponse::ok(support::service_types())
}

/// GET /api/v1/support-tools/expertise-areas
pub async fn expertise_areas() -> Json<ApiResponse<ExpertiseAreaList>> {
    ApiResponse::ok(support::expertise_areas())
}

/// POST /api/v1/support-tools/consultation-booking
pub async fn book_consultation(
    State(state): State<AppState>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Booking>>)> {
    let Json(request) = payload?;
    let booking = support::book_consultation(request, Utc::now())?;
    consultations::insert(&state.db, &booking.consultation).await?;

    info!(
        consultation_id = %booking.consultation.id,
        expert_id = %booking.consultation.expert_id,
        "Consultation booked"
    );
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(booking, "상담 신청이 완료되었습니다"),
    ))
}

/// GET /api/v1/support-tools/consultations/:id
pub async fn get_consultation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<ConsultationRecord>>> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| ApiError::BadRequest(format!("Invalid consultation id: {}", id)))?;
    Ok(ApiResponse::ok(consultations::get(&state.db, id).await?))
}

pub fn support_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/support-tools/support-centers", get(support_centers))
        .route("/api/v1/support-tools/expert-consultation", get(expert_consultation))
        .route("/api/v1/support-tools/policy-recommendations", post(policy_recommendations))
        .route("/api/v1/support-tools/success-cases", get(success_cases))
        .route("/api/v1/support-tools/policy-application", post(apply_policy))
        .route("/api/v1/support-tools/service-types", get(service_types))
        .route("/api/v1/support-tools/expertise-areas", get(expertise_areas))
        .route("/api/v1/support-tools/consultation-booking", post(book_consultation))
        .route("/api/v1/support-tools/consultations/:id", get(get_consultation))
}
