//! # Fixed Constants
//!
//! Values compiled into the binary: column names, axis geometry, marker
//! styling and the initial dropdown selection.

/// Columns every dataset must carry.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "rei_name",
    "cause_name",
    "sex_id",
    "super_region",
    "location_name",
    "mean_ensemble",
    "mean_submission",
];

/// Cell contents read as a missing estimate, besides the empty cell.
///
/// Matches the default NA markers of pandas' `read_csv`.
pub const MISSING_VALUE_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Maximum dataset file size (500 MB).
///
/// The whole table is held in memory, so the file is checked before reading.
pub const MAX_DATASET_FILE_SIZE: u64 = 500 * 1024 * 1024;

// =============================================================================
// AXES
// =============================================================================

/// Headroom added above the largest estimate on both axes.
pub const AXIS_MARGIN: f64 = 0.02;

/// Lower bound of both axes, slightly below zero so points on 0 stay visible.
pub const AXIS_FLOOR: f64 = -0.01;

// =============================================================================
// INITIAL SELECTION
// =============================================================================

/// Risk selected when the page first loads.
pub const DEFAULT_RISK: &str = "Diet low in fruits";

/// Outcome selected when the page first loads.
pub const DEFAULT_CAUSE: &str = "Ischemic heart disease";

/// Age label used in titles when the rows carry no single age band.
pub const DEFAULT_AGE_LABEL: &str = "Age 55-59";

// =============================================================================
// STYLING
// =============================================================================

pub const FONT_FAMILY: &str = "sans-serif";
pub const TITLE_FONT_SIZE: u8 = 13;
pub const AXIS_FONT_SIZE: u8 = 10;

pub const MARKER_SIZE: u8 = 7;
pub const MARKER_OPACITY: f64 = 0.7;
pub const MARKER_LINE_WIDTH: f64 = 0.5;
pub const MARKER_LINE_COLOR: &str = "white";

/// Colour of the dotted agreement line.
pub const DIAGONAL_COLOR: &str = "rgb(128, 0, 128)";
pub const DIAGONAL_WIDTH: u8 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_columns_are_unique() {
        let mut cols = REQUIRED_COLUMNS.to_vec();
        cols.sort_unstable();
        cols.dedup();
        assert_eq!(cols.len(), REQUIRED_COLUMNS.len());
    }
}
