//! # paf-core
//!
//! The read-only data layer of the PAF comparison dashboard - THE DATA.
//!
//! This crate loads a table comparing two estimation methods ("ensemble"
//! and "submission") of population attributable fractions, and answers the
//! three questions the dashboard asks of it:
//! - Which outcomes exist for a risk?
//! - What axis range fits a (risk, outcome) pair?
//! - Which points belong to which super-region, for one sex?
//!
//! ## Architectural Constraints
//!
//! - Loaded once, never mutated; share it behind `Arc`
//! - No async, no network dependencies (pure Rust)
//! - Unknown filter values select nothing; they are not errors

// =============================================================================
// MODULES
// =============================================================================

pub mod dataset;
pub mod figure;
pub mod primitives;
pub mod query;
pub mod types;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use dataset::{Dataset, DatasetSummary};
pub use figure::{Figure, ScatterTrace, build_figure};
pub use query::{RegionSeries, Selection, axis_max, common_age_group, series_by_region};
pub use types::{PafError, PafRecord, Sex};
