//! # Dashboard HTTP API Module
//!
//! This module implements the HTTP server using axum: the single-page UI
//! plus the JSON endpoints it calls.
//!
//! ## Endpoints
//!
//! - `GET /` - Dashboard page
//! - `GET /health` - Health check
//! - `GET /status` - Dataset summary
//! - `GET /api/risks` - Risk options and initial selection
//! - `GET /api/causes?risk=` - Outcome options for a risk
//! - `GET /api/figure?risk=&cause=&sex=` - Plotly figure for one panel
//!
//! ## Configuration (Environment Variables)
//!
//! - `PAF_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `PAF_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)

mod handlers;
mod middleware;
mod types;

pub use middleware::{create_rate_limiter, get_rate_limit_from_env};
// Re-export handlers and types for integration tests (via `paf_dash::api::*`)
pub use handlers::{
    causes_handler, figure_handler, health_handler, index_handler, risks_handler, status_handler,
};
pub use types::{
    CausesQuery, CausesResponse, ErrorResponse, FigureQuery, HealthResponse, RisksResponse,
    StatusResponse,
};

use crate::config::DefaultsConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::get,
};
use paf_core::{Dataset, PafError};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state: the read-only dataset and initial selection.
#[derive(Clone)]
pub struct AppState {
    /// The comparison table, loaded once at startup.
    pub dataset: Arc<Dataset>,
    /// Preferred initial dropdown values and title fallback.
    pub defaults: Arc<DefaultsConfig>,
}

impl AppState {
    /// Create new app state.
    #[must_use]
    pub fn new(dataset: Dataset, defaults: DefaultsConfig) -> Self {
        Self {
            dataset: Arc::new(dataset),
            defaults: Arc::new(defaults),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from environment configuration.
///
/// Reads `PAF_CORS_ORIGINS`:
/// - If "*": allows all origins
/// - If not set: localhost only
/// - Otherwise: comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("PAF_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins (PAF_CORS_ORIGINS=*)");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in PAF_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => {
            tracing::info!("CORS: No PAF_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:8050",
        "http://127.0.0.1:8050",
    ]
    .into_iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Rate Limiting - global quota (if enabled)
///
/// The rate limit is read from `PAF_RATE_LIMIT`.
pub fn create_router(state: AppState) -> Router {
    create_router_with_rate_limit(state, get_rate_limit_from_env())
}

/// Create the router with an explicit rate limit in requests/second (0 disables).
pub fn create_router_with_rate_limit(state: AppState, rate_limit: u32) -> Router {
    let cors = build_cors_layer();

    let rate_limiter = if rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
        Some(create_rate_limiter(rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    let mut router = Router::new()
        .route("/", get(handlers::index_handler))
        .route("/health", get(handlers::health_handler))
        .route("/status", get(handlers::status_handler))
        .route("/api/risks", get(handlers::risks_handler))
        .route("/api/causes", get(handlers::causes_handler))
        .route("/api/figure", get(handlers::figure_handler));

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), PafError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| PafError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| PafError::Io(format!("Server error: {}", e)))
}

/// Resolve when the process receives Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server");
}
