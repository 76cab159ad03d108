//! # Query Module
//!
//! Filter-and-aggregate operations behind the two dropdowns and the two
//! scatter panels.
//!
//! - Option lists keep first-appearance order, like a column's `unique()`
//! - The axis maximum is shared by both sexes of a (risk, outcome) pair
//! - One series per distinct super-region among the selected rows

use crate::primitives::AXIS_MARGIN;
use crate::{Dataset, PafRecord, Sex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A (risk, outcome) pair chosen in the dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub risk: String,
    pub cause: String,
}

impl Selection {
    #[must_use]
    pub fn new(risk: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            risk: risk.into(),
            cause: cause.into(),
        }
    }

    /// Whether a row belongs to this selection.
    #[must_use]
    pub fn matches(&self, record: &PafRecord) -> bool {
        record.rei_name == self.risk && record.cause_name == self.cause
    }
}

/// One scatter series: every point of one super-region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSeries {
    pub super_region: String,
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    pub text: Vec<String>,
}

impl RegionSeries {
    fn new(super_region: &str) -> Self {
        Self {
            super_region: super_region.to_string(),
            x: Vec::new(),
            y: Vec::new(),
            text: Vec::new(),
        }
    }

    fn push(&mut self, record: &PafRecord) {
        self.x.push(record.mean_ensemble);
        self.y.push(record.mean_submission);
        self.text.push(format!("Location: {}", record.location_name));
    }

    /// Number of points in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Distinct values in first-appearance order.
fn unique_in_order<'a, I>(values: I) -> Vec<String>
where
    I: Iterator<Item = &'a str>,
{
    let mut seen = BTreeSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

impl Dataset {
    /// Every risk in the dataset.
    #[must_use]
    pub fn risks(&self) -> Vec<String> {
        unique_in_order(self.records().iter().map(|r| r.rei_name.as_str()))
    }

    /// Outcomes present for `risk`. Empty for an unknown risk.
    #[must_use]
    pub fn causes_for_risk(&self, risk: &str) -> Vec<String> {
        unique_in_order(
            self.records()
                .iter()
                .filter(|r| r.rei_name == risk)
                .map(|r| r.cause_name.as_str()),
        )
    }

    /// Rows matching the selection, both sexes included.
    pub fn select<'a>(&'a self, selection: &'a Selection) -> impl Iterator<Item = &'a PafRecord> {
        self.records().iter().filter(move |r| selection.matches(r))
    }

    /// Initial dropdown values.
    ///
    /// Uses the preferred risk when it exists, else the first risk; then the
    /// preferred outcome when it exists for that risk, else its first outcome.
    #[must_use]
    pub fn resolve_defaults(&self, preferred_risk: &str, preferred_cause: &str) -> Selection {
        let risks = self.risks();
        let risk = if risks.iter().any(|r| r == preferred_risk) {
            preferred_risk.to_string()
        } else {
            risks.into_iter().next().unwrap_or_default()
        };

        let causes = self.causes_for_risk(&risk);
        let cause = if causes.iter().any(|c| c == preferred_cause) {
            preferred_cause.to_string()
        } else {
            causes.into_iter().next().unwrap_or_default()
        };

        Selection { risk, cause }
    }
}

/// Largest present value of either estimate, plus `AXIS_MARGIN`.
///
/// Missing and non-finite values are skipped. With nothing to measure the
/// maximum is taken as zero.
pub fn axis_max<'a>(rows: impl IntoIterator<Item = &'a PafRecord>) -> f64 {
    let peak = rows
        .into_iter()
        .flat_map(|r| [r.mean_ensemble, r.mean_submission])
        .flatten()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))));

    peak.unwrap_or(0.0) + AXIS_MARGIN
}

/// Group rows of one sex into per-region series, in first-appearance order.
pub fn series_by_region<'a>(
    rows: impl IntoIterator<Item = &'a PafRecord>,
    sex: Sex,
) -> Vec<RegionSeries> {
    let mut index: BTreeMap<&str, usize> = BTreeMap::new();
    let mut series: Vec<RegionSeries> = Vec::new();

    for record in rows.into_iter().filter(|r| r.sex() == Some(sex)) {
        let slot = *index.entry(record.super_region.as_str()).or_insert_with(|| {
            series.push(RegionSeries::new(&record.super_region));
            series.len() - 1
        });
        series[slot].push(record);
    }

    series
}

/// The single age band shared by all rows, if there is exactly one.
pub fn common_age_group<'a>(rows: impl IntoIterator<Item = &'a PafRecord>) -> Option<String> {
    let groups: BTreeSet<&str> = rows
        .into_iter()
        .filter_map(|r| r.age_group_name.as_deref())
        .collect();

    match groups.len() {
        1 => groups.into_iter().next().map(str::to_string),
        _ => None,
    }
}

// =============================================================================
// TESTS
// =============================================================================
