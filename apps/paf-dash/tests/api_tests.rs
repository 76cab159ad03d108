//! Integration tests for the dashboard HTTP API.
//!
//! Uses axum-test to exercise the handlers without starting a real server.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_test::TestServer;
use paf_core::{Dataset, Figure, PafRecord, Sex};
use paf_dash::api::{
    AppState, CausesResponse, ErrorResponse, HealthResponse, RisksResponse, StatusResponse,
    create_router, create_router_with_rate_limit,
};
use paf_dash::config::DefaultsConfig;
use tower::ServiceExt;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn record(risk: &str, cause: &str, sex: Sex, region: &str, loc: &str, x: f64, y: f64) -> PafRecord {
    PafRecord::new(risk, cause, sex, region, loc, Some(x), Some(y))
}

fn sample_dataset() -> Dataset {
    Dataset::from_records(vec![
        record("Diet low in fruits", "Ischemic heart disease", Sex::Male, "South Asia", "India", 0.10, 0.12),
        record("Diet low in fruits", "Ischemic heart disease", Sex::Female, "South Asia", "India", 0.08, 0.25),
        record("Diet low in fruits", "Ischemic heart disease", Sex::Male, "High-income", "Canada", 0.05, 0.04),
        record("Diet low in fruits", "Stroke", Sex::Male, "High-income", "Canada", 0.30, 0.28),
        record("Smoking", "Lung cancer", Sex::Male, "High-income", "Canada", 0.70, 0.65),
        record("Smoking", "Lung cancer", Sex::Female, "Sub-Saharan Africa", "Kenya", 0.20, 0.31),
    ])
    .unwrap()
}

fn create_test_app() -> axum::Router {
    let state = AppState::new(sample_dataset(), DefaultsConfig::default());
    create_router(state)
}

fn create_test_server() -> TestServer {
    TestServer::new(create_test_app()).unwrap()
}

// =============================================================================
// PAGE & HEALTH TESTS
// =============================================================================

#[tokio::test]
async fn test_index_serves_dashboard_page() {
    let response = create_test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
}

#[tokio::test]
async fn test_index_references_api() {
    let server = create_test_server();
    let response = server.get("/").await;

    response.assert_status_ok();
    let page = response.text();
    assert!(page.contains("paf-graphic-male"));
    assert!(page.contains("paf-graphic-female"));
    assert!(page.contains("/api/figure"));
}

#[tokio::test]
async fn test_index_drops_stale_redraws() {
    let server = create_test_server();
    let page = server.get("/").await.text();

    assert!(page.contains("const seq = ++redrawSeq;"));
    assert!(page.contains("if (seq !== redrawSeq)"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();
    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_status_reports_summary() {
    let server = create_test_server();
    let response = server.get("/status").await;

    response.assert_status_ok();
    let status: StatusResponse = response.json();
    assert_eq!(status.rows, 6);
    assert_eq!(status.risks, 2);
    assert_eq!(status.causes, 3);
    assert_eq!(status.super_regions, 3);
    assert_eq!(status.locations, 3);
    assert!(status.source.is_none());
}

// =============================================================================
// OPTION TESTS
// =============================================================================

#[tokio::test]
async fn test_risks_with_defaults() {
    let server = create_test_server();
    let response = server.get("/api/risks").await;

    response.assert_status_ok();
    let risks: RisksResponse = response.json();
    assert_eq!(risks.risks, vec!["Diet low in fruits", "Smoking"]);
    assert_eq!(risks.default_risk, "Diet low in fruits");
    assert_eq!(risks.default_cause, "Ischemic heart disease");
}

#[tokio::test]
async fn test_causes_restricted_to_risk() {
    let server = create_test_server();
    let response = server
        .get("/api/causes")
        .add_query_param("risk", "Diet low in fruits")
        .await;

    response.assert_status_ok();
    let causes: CausesResponse = response.json();
    assert_eq!(causes.risk, "Diet low in fruits");
    assert_eq!(causes.causes, vec!["Ischemic heart disease", "Stroke"]);
}

#[tokio::test]
async fn test_causes_unknown_risk_is_empty() {
    let server = create_test_server();
    let response = server
        .get("/api/causes")
        .add_query_param("risk", "Alcohol use")
        .await;

    response.assert_status_ok();
    let causes: CausesResponse = response.json();
    assert!(causes.causes.is_empty());
}

#[tokio::test]
async fn test_causes_missing_risk_is_bad_request() {
    let server = create_test_server();
    let response = server.get("/api/causes").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let error: ErrorResponse = response.json();
    assert!(!error.error.is_empty());
}

// =============================================================================
// FIGURE TESTS
// =============================================================================

#[tokio::test]
async fn test_figure_male_panel() {
    let server = create_test_server();
    let response = server
        .get("/api/figure")
        .add_query_param("risk", "Diet low in fruits")
        .add_query_param("cause", "Ischemic heart disease")
        .add_query_param("sex", "male")
        .await;

    response.assert_status_ok();
    let figure: Figure = response.json();
    let names: Vec<_> = figure.data.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["South Asia", "High-income"]);
    assert_eq!(figure.data[0].text, vec!["Location: India"]);
    assert_eq!(figure.layout.title.text, "<b>Male, Age 55-59</b>");
    // Shared scale: the female submission value 0.25 sets the maximum.
    assert!((figure.layout.xaxis.range[1] - 0.27).abs() < 1e-12);
    assert_eq!(figure.layout.xaxis.range, figure.layout.yaxis.range);
}

#[tokio::test]
async fn test_figure_female_panel() {
    let server = create_test_server();
    let response = server
        .get("/api/figure")
        .add_query_param("risk", "Smoking")
        .add_query_param("cause", "Lung cancer")
        .add_query_param("sex", "female")
        .await;

    response.assert_status_ok();
    let figure: Figure = response.json();
    assert_eq!(figure.data.len(), 1);
    assert_eq!(figure.data[0].name, "Sub-Saharan Africa");
    assert_eq!(figure.data[0].x, vec![Some(0.20)]);
    assert_eq!(figure.data[0].y, vec![Some(0.31)]);
    assert_eq!(figure.layout.title.text, "<b>Female, Age 55-59</b>");
}

#[tokio::test]
async fn test_figure_unknown_pair_is_empty() {
    let server = create_test_server();
    let response = server
        .get("/api/figure")
        .add_query_param("risk", "Smoking")
        .add_query_param("cause", "Stroke")
        .add_query_param("sex", "male")
        .await;

    response.assert_status_ok();
    let figure: Figure = response.json();
    assert!(figure.data.is_empty());
    assert_eq!(figure.layout.xaxis.range, [-0.01, 0.02]);
}

#[tokio::test]
async fn test_figure_invalid_sex_is_bad_request() {
    let server = create_test_server();
    let response = server
        .get("/api/figure")
        .add_query_param("risk", "Smoking")
        .add_query_param("cause", "Lung cancer")
        .add_query_param("sex", "both")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let error: ErrorResponse = response.json();
    assert!(!error.error.is_empty());
}

#[tokio::test]
async fn test_figure_missing_cause_is_bad_request() {
    let server = create_test_server();
    let response = server
        .get("/api/figure")
        .add_query_param("risk", "Smoking")
        .add_query_param("sex", "male")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = create_test_server();
    let response = server.get("/api/unknown").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// RATE LIMIT TESTS
// =============================================================================

#[tokio::test]
async fn test_rate_limit_rejects_burst() {
    let state = AppState::new(sample_dataset(), DefaultsConfig::default());
    let server = TestServer::new(create_router_with_rate_limit(state, 1)).unwrap();

    server.get("/health").await.assert_status_ok();

    let response = server.get("/api/risks").await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.text(), "Too Many Requests");
}

#[tokio::test]
async fn test_rate_limit_disabled_with_zero() {
    let state = AppState::new(sample_dataset(), DefaultsConfig::default());
    let server = TestServer::new(create_router_with_rate_limit(state, 0)).unwrap();

    for _ in 0..5 {
        server.get("/health").await.assert_status_ok();
    }
}

#[tokio::test]
async fn test_figure_accepts_short_sex_forms() {
    let server = create_test_server();
    for (sex, title) in [("f", "<b>Female, Age 55-59</b>"), ("1", "<b>Male, Age 55-59</b>")] {
        let response = server
            .get("/api/figure")
            .add_query_param("risk", "Smoking")
            .add_query_param("cause", "Lung cancer")
            .add_query_param("sex", sex)
            .await;

        response.assert_status_ok();
        let figure: Figure = response.json();
        assert_eq!(figure.layout.title.text, title);
    }
}
