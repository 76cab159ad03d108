//! # Figure Module
//!
//! Builds the plotly.js figure object (`{data, layout}`) for one scatter
//! panel. The JSON produced here is handed to `Plotly.react` unchanged.

use crate::primitives::{
    AXIS_FLOOR, AXIS_FONT_SIZE, DIAGONAL_COLOR, DIAGONAL_WIDTH, FONT_FAMILY, MARKER_LINE_COLOR,
    MARKER_LINE_WIDTH, MARKER_OPACITY, MARKER_SIZE, TITLE_FONT_SIZE,
};
use crate::query::{RegionSeries, Selection, axis_max, common_age_group, series_by_region};
use crate::{Dataset, Sex};
use serde::{Deserialize, Serialize};

// =============================================================================
// FIGURE MODEL
// =============================================================================

/// A complete plotly figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<ScatterTrace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: u8,
}

impl Font {
    fn sans(size: u8) -> Self {
        Self {
            family: FONT_FAMILY.to_string(),
            size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub width: f64,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub size: u8,
    pub line: Line,
}

/// One super-region's points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterTrace {
    #[serde(rename = "type")]
    pub kind: String,
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    pub text: Vec<String>,
    pub mode: String,
    pub opacity: f64,
    pub marker: Marker,
    pub name: String,
}

impl From<RegionSeries> for ScatterTrace {
    fn from(series: RegionSeries) -> Self {
        Self {
            kind: "scatter".to_string(),
            x: series.x,
            y: series.y,
            text: series.text,
            mode: "markers".to_string(),
            opacity: MARKER_OPACITY,
            marker: Marker {
                size: MARKER_SIZE,
                line: Line {
                    width: MARKER_LINE_WIDTH,
                    color: MARKER_LINE_COLOR.to_string(),
                    dash: None,
                },
            },
            name: series.super_region,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub range: [f64; 2],
    pub title: Title,
    pub tickfont: Font,
}

impl Axis {
    fn paf(label: &str, max: f64) -> Self {
        Self {
            range: [AXIS_FLOOR, max],
            title: Title {
                text: format!("<b>{label}</b>"),
                font: Font::sans(AXIS_FONT_SIZE),
            },
            tickfont: Font::sans(AXIS_FONT_SIZE),
        }
    }
}

/// Layout shape; only the agreement diagonal is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: String,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub line: Line,
}

impl Shape {
    /// Dotted line from (0, 0) to (1, 1) in data coordinates.
    fn agreement_diagonal() -> Self {
        Self {
            kind: "line".to_string(),
            x0: 0.0,
            y0: 0.0,
            x1: 1.0,
            y1: 1.0,
            line: Line {
                width: f64::from(DIAGONAL_WIDTH),
                color: DIAGONAL_COLOR.to_string(),
                dash: Some("dot".to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub l: u16,
    pub b: u16,
    pub t: u16,
    pub r: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub orientation: String,
    pub x: f64,
    pub y: f64,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub shapes: Vec<Shape>,
    pub margin: Margin,
    pub legend: Legend,
    pub hovermode: String,
}

impl Layout {
    fn scatter_panel(title: String, max: f64) -> Self {
        Self {
            title: Title {
                text: title,
                font: Font::sans(TITLE_FONT_SIZE),
            },
            xaxis: Axis::paf("Ensemble PAF", max),
            yaxis: Axis::paf("Submission PAF", max),
            shapes: vec![Shape::agreement_diagonal()],
            margin: Margin {
                l: 50,
                b: 40,
                t: 40,
                r: 10,
            },
            legend: Legend {
                orientation: "h".to_string(),
                x: 0.0,
                y: -0.15,
                font: Font::sans(AXIS_FONT_SIZE),
            },
            hovermode: "closest".to_string(),
        }
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Build the scatter panel for one sex of a (risk, outcome) selection.
///
/// The axis range is computed over both sexes so the two panels share a
/// scale. `fallback_age_label` is used in the title unless every selected
/// row carries the same age band.
#[must_use]
pub fn build_figure(
    dataset: &Dataset,
    selection: &Selection,
    sex: Sex,
    fallback_age_label: &str,
) -> Figure {
    let max = axis_max(dataset.select(selection));
    let age_label = common_age_group(dataset.select(selection))
        .map(|band| format!("Age {band}"))
        .unwrap_or_else(|| fallback_age_label.to_string());

    let data = series_by_region(dataset.select(selection), sex)
        .into_iter()
        .map(ScatterTrace::from)
        .collect();

    Figure {
        data,
        layout: Layout::scatter_panel(format!("<b>{}, {}</b>", sex.label(), age_label), max),
    }
}

// =============================================================================
// TESTS
// =============================================================================
