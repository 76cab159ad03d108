//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Every handler is a synchronous read of the shared dataset. Unknown risk or
//! outcome values are answered with empty option lists or empty figures;
//! only missing or malformed query parameters are rejected.

use super::{
    AppState,
    types::{
        CausesQuery, CausesResponse, ErrorResponse, FigureQuery, HealthResponse, RisksResponse,
        StatusResponse,
    },
};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use paf_core::build_figure;

/// The single-page dashboard.
const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Map a query-string rejection to a JSON 400.
fn bad_request(rejection: QueryRejection) -> Response {
    tracing::debug!("Rejected query string: {}", rejection.body_text());
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(rejection.body_text())),
    )
        .into_response()
}

// =============================================================================
// PAGE HANDLER
// =============================================================================

/// Serve the dashboard page.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// STATUS HANDLER
// =============================================================================

/// Get dataset status.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let source = state
        .dataset
        .source()
        .map(|p| p.to_string_lossy().into_owned());
    let response = StatusResponse::new(state.dataset.summary(), source);

    (StatusCode::OK, Json(response))
}

// =============================================================================
// OPTION HANDLERS
// =============================================================================

/// List risks together with the initial selection.
pub async fn risks_handler(State(state): State<AppState>) -> impl IntoResponse {
    let initial = state
        .dataset
        .resolve_defaults(&state.defaults.risk, &state.defaults.cause);

    Json(RisksResponse {
        risks: state.dataset.risks(),
        default_risk: initial.risk,
        default_cause: initial.cause,
    })
}

/// List outcomes available for a risk.
pub async fn causes_handler(
    State(state): State<AppState>,
    query: Result<Query<CausesQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return bad_request(rejection),
    };

    let causes = state.dataset.causes_for_risk(&query.risk);
    Json(CausesResponse {
        risk: query.risk,
        causes,
    })
    .into_response()
}

// =============================================================================
// FIGURE HANDLER
// =============================================================================

/// Build the scatter figure for one sex of a (risk, outcome) pair.
pub async fn figure_handler(
    State(state): State<AppState>,
    query: Result<Query<FigureQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return bad_request(rejection),
    };

    let figure = build_figure(
        &state.dataset,
        &query.selection(),
        query.sex,
        &state.defaults.age_label,
    );
    tracing::debug!(
        risk = %query.risk,
        cause = %query.cause,
        sex = %query.sex,
        traces = figure.data.len(),
        "Figure built"
    );

    Json(figure).into_response()
}
