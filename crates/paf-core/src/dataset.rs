//! # Dataset Module
//!
//! Loads the comparison table once and holds it read-only for the lifetime
//! of the process.
//!
//! - Validate the path and file size before reading
//! - Check the header for every required column
//! - Decode each row into a `PafRecord`
//! - Reject an empty table

use crate::primitives::{MAX_DATASET_FILE_SIZE, REQUIRED_COLUMNS};
use crate::{PafError, PafRecord};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// The in-memory comparison table.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<PafRecord>,
    source: Option<PathBuf>,
}

/// Row and distinct-value counts, reported by `/status` and `summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub risks: usize,
    pub causes: usize,
    pub super_regions: usize,
    pub locations: usize,
}

impl Dataset {
    /// Load a dataset from a CSV file on disk.
    pub fn load(path: &Path) -> Result<Self, PafError> {
        let started = Instant::now();
        let canonical = validate_file_path(path)?;
        validate_file_size(&canonical, MAX_DATASET_FILE_SIZE)?;

        let file = std::fs::File::open(&canonical)
            .map_err(|e| PafError::Io(format!("Open '{}': {}", path.display(), e)))?;
        let mut dataset = Self::from_reader(file)?;
        dataset.source = Some(canonical);

        tracing::info!(
            path = %path.display(),
            rows = dataset.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Dataset loaded"
        );
        Ok(dataset)
    }

    /// Decode a dataset from any CSV byte stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PafError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(PafError::MissingColumn(column.to_string()));
            }
        }

        let records = csv_reader
            .deserialize::<PafRecord>()
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_records(records)
    }

    /// Build a dataset from already-decoded rows.
    pub fn from_records(records: Vec<PafRecord>) -> Result<Self, PafError> {
        if records.is_empty() {
            return Err(PafError::EmptyDataset);
        }
        Ok(Self {
            records,
            source: None,
        })
    }

    /// All rows in file order.
    #[must_use]
    pub fn records(&self) -> &[PafRecord] {
        &self.records
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no rows. Always false once constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Canonical path the dataset was read from, if it came from disk.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Count rows and distinct values of each categorical column.
    #[must_use]
    pub fn summary(&self) -> DatasetSummary {
        fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> usize {
            values.collect::<BTreeSet<_>>().len()
        }

        DatasetSummary {
            rows: self.records.len(),
            risks: distinct(self.records.iter().map(|r| r.rei_name.as_str())),
            causes: distinct(self.records.iter().map(|r| r.cause_name.as_str())),
            super_regions: distinct(self.records.iter().map(|r| r.super_region.as_str())),
            locations: distinct(self.records.iter().map(|r| r.location_name.as_str())),
        }
    }
}

// =============================================================================
// FILE VALIDATION
// =============================================================================

/// Resolve the path and ensure it names a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, PafError> {
    let canonical = path.canonicalize().map_err(|e| {
        PafError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(PafError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Reject files larger than `max_size` before reading them.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), PafError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| PafError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(PafError::FileTooLarge {
            size: metadata.len(),
            max: max_size,
        });
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
