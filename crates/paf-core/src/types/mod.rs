//! # Core Type Definitions
//!
//! This module contains the types shared by every layer of the dashboard:
//! - One row of the comparison table (`PafRecord`)
//! - The plotted sexes (`Sex`)
//! - Error types (`PafError`)
//!
//! ## Missing Values
//!
//! Estimate columns are `Option<f64>`. An empty cell or any of the usual
//! NA markers (`NA`, `N/A`, `NULL`, `nan`, ...) decodes to `None` and is
//! skipped by every aggregate.

use crate::primitives::MISSING_VALUE_TOKENS;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// RECORD
// =============================================================================

/// One row of the comparison table.
///
/// Field names match the CSV header exactly so rows can be decoded with
/// `csv::Reader::deserialize`. Columns not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PafRecord {
    /// Risk factor name (the first dropdown).
    pub rei_name: String,
    /// Outcome name (the second dropdown).
    pub cause_name: String,
    /// Raw sex identifier. Only 1 and 2 are plotted.
    #[serde(deserialize_with = "deserialize_sex_id")]
    pub sex_id: u8,
    /// Age band label, when the file carries one.
    #[serde(default)]
    pub age_group_name: Option<String>,
    /// Coarse geographic grouping; one scatter series per value.
    pub super_region: String,
    /// Location shown in the hover text.
    pub location_name: String,
    /// Ensemble method estimate (x axis).
    #[serde(deserialize_with = "deserialize_estimate")]
    pub mean_ensemble: Option<f64>,
    /// Submission method estimate (y axis).
    #[serde(deserialize_with = "deserialize_estimate")]
    pub mean_submission: Option<f64>,
}

/// Decode an estimate cell, mapping empty cells and NA markers to `None`.
fn deserialize_estimate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() || MISSING_VALUE_TOKENS.contains(&raw) {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|e| de::Error::custom(format!("invalid estimate '{raw}': {e}")))
}

/// Decode `sex_id`, accepting integral floats such as `1.0`.
fn deserialize_sex_id<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<u8>() {
        return Ok(id);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&v) => Ok(v as u8),
        _ => Err(de::Error::custom(format!("invalid sex_id '{raw}'"))),
    }
}

impl PafRecord {
    /// Create a record with no age band.
    #[must_use]
    pub fn new(
        risk: impl Into<String>,
        cause: impl Into<String>,
        sex: Sex,
        super_region: impl Into<String>,
        location: impl Into<String>,
        mean_ensemble: Option<f64>,
        mean_submission: Option<f64>,
    ) -> Self {
        Self {
            rei_name: risk.into(),
            cause_name: cause.into(),
            sex_id: sex.id(),
            age_group_name: None,
            super_region: super_region.into(),
            location_name: location.into(),
            mean_ensemble,
            mean_submission,
        }
    }

    /// Attach an age band label.
    #[must_use]
    pub fn with_age_group(mut self, age_group: impl Into<String>) -> Self {
        self.age_group_name = Some(age_group.into());
        self
    }

    /// The plotted sex of this row, if it is one.
    #[must_use]
    pub fn sex(&self) -> Option<Sex> {
        Sex::from_id(self.sex_id)
    }
}

// =============================================================================
// SEX
// =============================================================================

/// The two sexes that get a scatter panel each.
///
/// Serializes as the lowercase slug. Parsing (`FromStr` and serde alike)
/// accepts the slug in any case, `m`/`f`, or the numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Both panels, in display order.
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    /// Numeric identifier used in the `sex_id` column.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Sex::Male => 1,
            Sex::Female => 2,
        }
    }

    /// Map a `sex_id` value back to a plotted sex.
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Sex::Male),
            2 => Some(Sex::Female),
            _ => None,
        }
    }

    /// Human-readable label used in figure titles.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }

    /// Lowercase slug used in URLs and CLI arguments.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Sex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

impl FromStr for Sex {
    type Err = PafError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "1" => Ok(Sex::Male),
            "female" | "f" | "2" => Ok(Sex::Female),
            other => Err(PafError::InvalidSex(other.to_string())),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while loading or querying the dataset.
///
/// - No silent failures
/// - Use `Result<T, PafError>` for fallible operations
/// - Unknown filter values are NOT errors; they select nothing
#[derive(Debug, Error)]
pub enum PafError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),

    /// A CSV row could not be decoded.
    #[error("CSV error at line {line}: {message}")]
    Csv { line: u64, message: String },

    /// A required column is missing from the header.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// The dataset file exceeds the size limit.
    #[error("File size {size} bytes exceeds maximum allowed {max} bytes")]
    FileTooLarge { size: u64, max: u64 },

    /// The dataset has a header but no rows.
    #[error("Dataset contains no rows")]
    EmptyDataset,

    /// A sex argument could not be parsed.
    #[error("Invalid sex '{0}': expected 'male' or 'female'")]
    InvalidSex(String),

    /// A configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<csv::Error> for PafError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            return PafError::Io(err.to_string());
        }
        PafError::Csv {
            line: err.position().map_or(0, |p| p.line()),
            message: err.to_string(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
