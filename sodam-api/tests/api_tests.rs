//! Integration tests for sodam-api endpoints
//!
//! The router is driven with `oneshot` against an in-memory SQLite database.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use sodam_api::{build_router, AppState};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: single-connection in-memory database with the schema applied
async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Should open in-memory database");
    sodam_common::db::init::create_schema(&pool)
        .await
        .expect("Should create schema");
    pool
}

async fn setup_app() -> axum::Router {
    build_router(AppState::new(setup_test_db().await))
}

fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Send one request and return status plus parsed body
async fn call(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, extract_json(response.into_body()).await)
}

// =============================================================================
// Service endpoints
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app().await;
    let (status, body) = call(&app, test_request("GET", "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "sodam-api");
    assert!(body["version"].is_string());
    assert!(body["uptime_seconds"].as_i64().unwrap() >= 0);
}

#[tokio::test]
async fn test_buildinfo_endpoint() {
    let app = setup_app().await;
    let (status, body) = call(&app, test_request("GET", "/api/buildinfo")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["git_hash"].is_string());
    assert!(body["build_profile"].is_string());
}

#[tokio::test]
async fn test_unknown_route_uses_error_envelope() {
    let app = setup_app().await;
    let (status, body) = call(&app, test_request("GET", "/api/v1/nowhere")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

// =============================================================================
// Markets
// =============================================================================

#[tokio::test]
async fn test_list_markets() {
    let app = setup_app().await;
    let (status, body) = call(&app, test_request("GET", "/api/v1/markets")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["total_count"], 5);
    assert!(body["timestamp"].is_string());
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_get_market_and_unknown_market() {
    let app = setup_app().await;

    let (status, body) = call(&app, test_request("GET", "/api/v1/markets/10000")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "대전역 상권");
    assert_eq!(body["data"]["competition_level"], "high");
    assert!(body["data"]["indicators"]["average_income"].is_number());

    let (status, body) = call(&app, test_request("GET", "/api/v1/markets/99999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_districts_listing() {
    let app = setup_app().await;
    let (status, body) = call(&app, test_request("GET", "/api/v1/market-diagnosis/districts")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_count"], 5);
    assert_eq!(body["data"]["districts"][0]["district_name"], "대덕구");
    assert_eq!(body["data"]["districts"][0]["market_count"], 1);
}

#[tokio::test]
async fn test_tourism_trend() {
    let app = setup_app().await;
    let (status, body) =
        call(&app, test_request("GET", "/api/v1/market-diagnosis/tourism-trend")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["region"], "대전광역시");
    assert_eq!(body["data"]["total_months"], 12);
    assert!(body["data"]["trend_data"][0]["amount"].as_f64().unwrap() > 0.0);

    let (status, body) = call(
        &app,
        test_request(
            "GET",
            "/api/v1/market-diagnosis/tourism-trend?region=%EC%A0%9C%EC%A3%BC",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

// =============================================================================
// Core diagnosis
// =============================================================================

#[tokio::test]
async fn test_foot_traffic_respects_period() {
    let app = setup_app().await;
    let (status, body) = call(
        &app,
        test_request("GET", "/api/v1/core-diagnosis/foot-traffic/10000?period_months=6"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["monthly_data"].as_array().unwrap().len(), 6);
    let grade = body["data"]["grade"].as_str().unwrap();
    assert!(["A", "B", "C", "D"].contains(&grade));
}

#[tokio::test]
async fn test_foot_traffic_zero_period_is_bad_request() {
    let app = setup_app().await;
    let (status, body) = call(
        &app,
        test_request("GET", "/api/v1/core-diagnosis/foot-traffic/10000?period_months=0"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_same_industry_breakdown_without_industry() {
    let app = setup_app().await;
    let (status, body) = call(
        &app,
        test_request("GET", "/api/v1/core-diagnosis/same-industry/20000"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["data"]["industry_breakdown"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_health_score_and_comprehensive() {
    let app = setup_app().await;

    let (status, body) = call(
        &app,
        json_request("POST", "/api/v1/core-diagnosis/health-score/10000", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let total = body["data"]["total_score"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&total));

    let (status, body) = call(
        &app,
        json_request("POST", "/api/v1/core-diagnosis/comprehensive/10000", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
    assert!(!body["data"]["indicators"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = setup_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/core-diagnosis/health-score/10000")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = call(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

// =============================================================================
// Scoring
// =============================================================================

#[tokio::test]
async fn test_scoring_calculate() {
    let app = setup_app().await;
    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/scoring/calculate",
            json!({ "market_code": "10000", "industry": "식음료업", "region": "대전광역시" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let total = body["data"]["total_score"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&total));
    assert!(body["data"]["grade"].is_string());
}

#[tokio::test]
async fn test_scoring_compare_requires_two_regions() {
    let app = setup_app().await;
    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/scoring/compare",
            json!({ "industry": "식음료업", "regions": ["대전광역시 동구"] }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_scoring_compare_ranks_regions() {
    let app = setup_app().await;
    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/scoring/compare",
            json!({ "industry": "식음료업", "regions": ["대전광역시 동구", "대전광역시 유성구"] }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let comparisons = body["data"]["comparisons"].as_array().unwrap();
    assert_eq!(comparisons.len(), 2);
    assert_eq!(comparisons[0]["rank"], 1);
    assert!(
        comparisons[0]["total_score"].as_f64().unwrap()
            >= comparisons[1]["total_score"].as_f64().unwrap()
    );
}

// =============================================================================
// Risk classification
// =============================================================================

#[tokio::test]
async fn test_classify_is_persisted_in_history() {
    let app = setup_app().await;

    for _ in 0..2 {
        let (status, body) = call(
            &app,
            json_request(
                "POST",
                "/api/v1/risk-classification/classify/30000",
                json!({ "industry": "식음료업" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["primary_risk_type"].is_string());
        assert_eq!(body["data"]["secondary_risks"].as_array().unwrap().len(), 2);
    }

    let (status, body) = call(
        &app,
        test_request("GET", "/api/v1/risk-classification/history/30000?limit=1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_count"], 1);
    let record = &body["data"]["analyses"][0];
    assert_eq!(record["market_code"], "30000");
    assert_eq!(record["industry"], "식음료업");
    assert_eq!(
        record["risk_type"],
        record["analysis_data"]["primary_risk_type"]
    );

    let (_, body) = call(
        &app,
        test_request("GET", "/api/v1/risk-classification/history/30000"),
    )
    .await;
    assert_eq!(body["data"]["total_count"], 2);
}

#[tokio::test]
async fn test_classify_without_body() {
    let app = setup_app().await;
    let (status, body) = call(
        &app,
        test_request("POST", "/api/v1/risk-classification/classify/10000"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["industry"].is_null());
}

#[tokio::test]
async fn test_history_limit_out_of_range() {
    let app = setup_app().await;
    let (status, _) = call(
        &app,
        test_request("GET", "/api/v1/risk-classification/history/10000?limit=0"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_detailed_analysis_rejects_unknown_risk_type() {
    let app = setup_app().await;

    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/risk-classification/detailed-analysis/10000",
            json!({ "risk_type": "과포화 경쟁형" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["action_plan"].as_array().unwrap().len(), 4);

    let (status, _) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/risk-classification/detailed-analysis/10000",
            json!({ "risk_type": "unknown" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mitigation_strategies_filter() {
    let app = setup_app().await;

    let (_, body) = call(
        &app,
        test_request("GET", "/api/v1/risk-classification/mitigation-strategies"),
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 4);

    let (status, body) = call(
        &app,
        test_request(
            "GET",
            "/api/v1/risk-classification/mitigation-strategies?risk_type=low_spending",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["risk_type"], "소비력 약형");
}

// =============================================================================
// Strategy cards
// =============================================================================

#[tokio::test]
async fn test_generate_strategy_cards() {
    let app = setup_app().await;
    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/strategy-cards/generate",
            json!({
                "market_code": "10000",
                "industry": "식음료업",
                "risk_type": "유입 저조형",
                "user_profile": {
                    "businessStage": "GROWTH",
                    "capital": 20000000,
                    "experience": "expert"
                }
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let cards = body["data"]["strategy_cards"].as_array().unwrap();
    assert!(!cards.is_empty() && cards.len() <= 3);
    assert_eq!(cards[0]["success_probability"], 95);
    assert_eq!(
        body["data"]["priority_order"].as_array().unwrap().len(),
        cards.len()
    );
}

#[tokio::test]
async fn test_generate_for_unknown_market() {
    let app = setup_app().await;
    let (status, _) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/strategy-cards/generate",
            json!({ "market_code": "99999", "industry": "식음료업", "risk_type": "유입 저조형" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_checklist_lookup() {
    let app = setup_app().await;

    let (status, body) = call(
        &app,
        test_request("GET", "/api/v1/strategy-cards/checklist/marketing_boost"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["strategy_id"], "marketing_boost");

    let (status, _) = call(
        &app,
        test_request("GET", "/api/v1/strategy-cards/checklist/innovation"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_categories_count_templates() {
    let app = setup_app().await;
    let (_, body) = call(&app, test_request("GET", "/api/v1/strategy-cards/categories")).await;

    let total: u64 = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["template_count"].as_u64().unwrap())
        .sum();
    assert_eq!(total, 6);
}

#[tokio::test]
async fn test_difficulty_levels() {
    let app = setup_app().await;
    let (status, body) =
        call(&app, test_request("GET", "/api/v1/strategy-cards/difficulty-levels")).await;

    assert_eq!(status, StatusCode::OK);
    let levels = body["data"].as_array().unwrap();
    assert_eq!(levels.len(), 4);
    assert_eq!(levels[0]["level"], "낮음");
    assert_eq!(levels[3]["level"], "매우 높음");
}

// =============================================================================
// Support tools
// =============================================================================

#[tokio::test]
async fn test_book_and_fetch_consultation() {
    let app = setup_app().await;
    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/support-tools/consultation-booking",
            json!({
                "expert_id": "expert_001",
                "requester_name": "홍길동",
                "consultation_type": "온라인 상담",
                "contact": "010-0000-0000"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["expert_name"], "김창업");
    assert_eq!(body["data"]["consultation"]["status"], "requested");
    let id = body["data"]["consultation"]["id"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        test_request("GET", &format!("/api/v1/support-tools/consultations/{}", id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["requester_name"], "홍길동");
    assert_eq!(body["data"]["contact"], "010-0000-0000");
}

#[tokio::test]
async fn test_booking_errors() {
    let app = setup_app().await;

    let booking = |expert: &str, kind: &str| {
        json_request(
            "POST",
            "/api/v1/support-tools/consultation-booking",
            json!({ "expert_id": expert, "requester_name": "홍길동", "consultation_type": kind }),
        )
    };

    let (status, _) = call(&app, booking("expert_999", "온라인 상담")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(&app, booking("expert_004", "온라인 상담")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    let (status, _) = call(&app, booking("expert_001", "화상 상담")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_consultation_lookup_errors() {
    let app = setup_app().await;

    let (status, _) = call(
        &app,
        test_request("GET", "/api/v1/support-tools/consultations/not-a-uuid"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        test_request(
            "GET",
            "/api/v1/support-tools/consultations/00000000-0000-4000-8000-000000000000",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_policy_recommendations() {
    let app = setup_app().await;
    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/support-tools/policy-recommendations",
            json!({ "preferredAreas": ["대전광역시"], "interestedBusinessTypes": ["식음료업"] }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["total_policies"].as_u64().unwrap() >= 1);
    assert!(!body["data"]["application_guide"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_expert_listing_includes_consultation_types() {
    let app = setup_app().await;
    let (status, body) = call(
        &app,
        test_request("GET", "/api/v1/support-tools/expert-consultation"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["consultation_types"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_policy_application() {
    let app = setup_app().await;
    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/support-tools/policy-application",
            json!({
                "policy_id": "policy_002",
                "applicant_name": "홍길동",
                "submitted_documents": ["사업계획서"]
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "incomplete");
    assert_eq!(body["data"]["missing_documents"].as_array().unwrap().len(), 2);
    assert!(body["data"]["application_id"].is_string());

    let (status, _) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/support-tools/policy-application",
            json!({ "policy_id": "policy_999", "applicant_name": "홍길동" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_service_types_and_expertise_areas() {
    let app = setup_app().await;

    let (status, body) =
        call(&app, test_request("GET", "/api/v1/support-tools/service-types")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_service_types"], 5);
    assert_eq!(body["data"]["service_types"][0]["id"], "창업상담");
    assert_eq!(body["data"]["service_types"][0]["center_count"], 3);

    let (status, body) =
        call(&app, test_request("GET", "/api/v1/support-tools/expertise-areas")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_areas"], 11);
}

// =============================================================================
// Map visualization
// =============================================================================

#[tokio::test]
async fn test_heatmap_types() {
    let app = setup_app().await;

    let (status, body) = call(&app, test_request("GET", "/api/v1/map-visualization/heatmap")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["heatmap_data"].as_array().unwrap().len(), 5);

    let (status, _) = call(
        &app,
        test_request("GET", "/api/v1/map-visualization/heatmap?analysis_type=rainfall"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_radius_analysis() {
    let app = setup_app().await;

    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/map-visualization/radius-analysis",
            json!({ "center_lat": 36.3316, "center_lng": 127.4342, "radius_km": 1.0 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["analysis_type"], "comprehensive");

    let (status, _) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/map-visualization/radius-analysis",
            json!({ "center_lat": 37.5665, "center_lng": 126.9780, "radius_km": 1.0 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/map-visualization/radius-analysis",
            json!({ "center_lat": 36.3316, "center_lng": 127.4342, "radius_km": -1.0 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_traffic_flow_periods() {
    let app = setup_app().await;

    let (status, body) = call(
        &app,
        test_request("GET", "/api/v1/map-visualization/traffic-flow/10000"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["traffic_flow"].as_array().unwrap().len(), 24);
    assert_eq!(body["data"]["peak_hours"].as_array().unwrap().len(), 3);

    let (_, body) = call(
        &app,
        test_request(
            "GET",
            "/api/v1/map-visualization/traffic-flow/10000?time_period=weekly",
        ),
    )
    .await;
    assert_eq!(body["data"]["traffic_flow"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_cluster_analysis() {
    let app = setup_app().await;
    let (status, body) = call(
        &app,
        test_request(
            "GET",
            "/api/v1/map-visualization/cluster-analysis?cluster_type=growth_stage",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["cluster_type"], "growth_stage");
    assert_eq!(body["data"]["total_markets"], 5);
}

#[tokio::test]
async fn test_accessibility() {
    let app = setup_app().await;
    let (status, body) = call(
        &app,
        test_request("GET", "/api/v1/map-visualization/accessibility/50000"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["accessibility_score"], 65.8);
    assert_eq!(body["data"]["transportation"]["subway"]["available"], false);
    assert_eq!(body["data"]["improvement_suggestions"].as_array().unwrap().len(), 4);

    let (status, _) = call(
        &app,
        test_request("GET", "/api/v1/map-visualization/accessibility/99999"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_analysis_types_and_regions() {
    let app = setup_app().await;

    let (status, body) =
        call(&app, test_request("GET", "/api/v1/map-visualization/analysis-types")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["heatmap"].as_array().unwrap().len(), 4);
    assert_eq!(body["data"]["radius_analysis"][0]["type"], "comprehensive");
    assert_eq!(body["data"]["traffic_periods"], json!(["daily", "weekly"]));

    let (status, body) = call(&app, test_request("GET", "/api/v1/map-visualization/regions")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_regions"], 6);
    assert_eq!(body["data"]["regions"][0]["market_count"], 5);
}

// =============================================================================
// File-backed persistence
// =============================================================================

#[tokio::test]
async fn test_bookings_survive_reopening_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("sodam.db");

    let pool = sodam_common::db::init_database(&db_path).await.unwrap();
    let app = build_router(AppState::new(pool.clone()));
    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/api/v1/support-tools/consultation-booking",
            json!({
                "expert_id": "expert_002",
                "requester_name": "김소담",
                "consultation_type": "전화 상담"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["consultation"]["id"].as_str().unwrap().to_string();
    pool.close().await;

    let reopened = sodam_common::db::init_database(&db_path).await.unwrap();
    let app = build_router(AppState::new(reopened));
    let (status, body) = call(
        &app,
        test_request("GET", &format!("/api/v1/support-tools/consultations/{}", id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["consultation_type"], "전화 상담");
}
