//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use paf_core::{DatasetSummary, Selection, Sex};
use paf_dash::api::{
    CausesResponse, ErrorResponse, FigureQuery, HealthResponse, RisksResponse, StatusResponse,
};

// =============================================================================
// HEALTH RESPONSE TESTS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_health_response_deserialization() {
    let json = r#"{"status":"ok","version":"0.3.1"}"#;
    let health: HealthResponse = serde_json::from_str(json).unwrap();
    assert_eq!(health.version, "0.3.1");
}

// =============================================================================
// STATUS RESPONSE TESTS
// =============================================================================

#[test]
fn test_status_response_from_summary() {
    let summary = DatasetSummary {
        rows: 1200,
        risks: 12,
        causes: 30,
        super_regions: 7,
        locations: 195,
    };
    let status = StatusResponse::new(summary, Some("/data/final.csv".to_string()));

    let json = serde_json::to_string(&status).unwrap();
    assert!(json.contains("\"rows\":1200"));
    assert!(json.contains("\"super_regions\":7"));
    assert!(json.contains("\"source\":\"/data/final.csv\""));
}

#[test]
fn test_status_response_without_source() {
    let summary = DatasetSummary {
        rows: 1,
        risks: 1,
        causes: 1,
        super_regions: 1,
        locations: 1,
    };
    let json = serde_json::to_string(&StatusResponse::new(summary, None)).unwrap();
    assert!(json.contains("\"source\":null"));
}

// =============================================================================
// OPTION RESPONSE TESTS
// =============================================================================

#[test]
fn test_risks_response_serialization() {
    let risks = RisksResponse {
        risks: vec!["Smoking".to_string(), "Diet low in fruits".to_string()],
        default_risk: "Diet low in fruits".to_string(),
        default_cause: "Ischemic heart disease".to_string(),
    };

    let json = serde_json::to_string(&risks).unwrap();
    assert!(json.contains("\"risks\":[\"Smoking\",\"Diet low in fruits\"]"));
    assert!(json.contains("\"default_cause\":\"Ischemic heart disease\""));
}

#[test]
fn test_causes_response_deserialization() {
    let json = r#"{"risk":"Smoking","causes":["Lung cancer","Stroke"]}"#;
    let causes: CausesResponse = serde_json::from_str(json).unwrap();
    assert_eq!(causes.risk, "Smoking");
    assert_eq!(causes.causes.len(), 2);
}

// =============================================================================
// FIGURE QUERY TESTS
// =============================================================================

#[test]
fn test_figure_query_selection() {
    let json = r#"{"risk":"Smoking","cause":"Lung cancer","sex":"female"}"#;
    let query: FigureQuery = serde_json::from_str(json).unwrap();

    assert_eq!(query.sex, Sex::Female);
    assert_eq!(query.selection(), Selection::new("Smoking", "Lung cancer"));
}

#[test]
fn test_figure_query_rejects_unknown_sex() {
    let json = r#"{"risk":"Smoking","cause":"Lung cancer","sex":"both"}"#;
    assert!(serde_json::from_str::<FigureQuery>(json).is_err());
}

// =============================================================================
// ERROR RESPONSE TESTS
// =============================================================================

#[test]
fn test_error_response_serialization() {
    let json = serde_json::to_string(&ErrorResponse::new("missing field `risk`")).unwrap();
    assert_eq!(json, r#"{"error":"missing field `risk`"}"#);
}
