//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use paf_core::{DatasetSummary, Selection, Sex};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Dataset status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub rows: usize,
    pub risks: usize,
    pub causes: usize,
    pub super_regions: usize,
    pub locations: usize,
    pub source: Option<String>,
}

impl StatusResponse {
    pub fn new(summary: DatasetSummary, source: Option<String>) -> Self {
        Self {
            rows: summary.rows,
            risks: summary.risks,
            causes: summary.causes,
            super_regions: summary.super_regions,
            locations: summary.locations,
            source,
        }
    }
}

// =============================================================================
// DROPDOWN OPTIONS
// =============================================================================

/// Risk dropdown options and the initial selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RisksResponse {
    pub risks: Vec<String>,
    pub default_risk: String,
    pub default_cause: String,
}

/// `GET /api/causes` query string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CausesQuery {
    pub risk: String,
}

/// Outcome dropdown options for one risk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CausesResponse {
    pub risk: String,
    pub causes: Vec<String>,
}

// =============================================================================
// FIGURE REQUEST
// =============================================================================

/// `GET /api/figure` query string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureQuery {
    pub risk: String,
    pub cause: String,
    pub sex: Sex,
}

impl FigureQuery {
    pub fn selection(&self) -> Selection {
        Selection::new(self.risk.as_str(), self.cause.as_str())
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Body returned with 4xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}
