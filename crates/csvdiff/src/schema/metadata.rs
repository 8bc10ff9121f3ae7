//! Dataset-level metadata.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::column::ColumnProfile;
use crate::error::Result;

/// Structured profile of a loaded dataset.
///
/// Built once per load and never modified afterwards; analyzers only borrow
/// it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Path the data was loaded from.
    pub file_path: PathBuf,
    /// File name without directories.
    pub file_name: String,
    /// File size in bytes.
    pub file_size_bytes: u64,
    /// Field separator used for parsing.
    pub separator: char,
    /// Whether the separator was auto-detected.
    pub separator_detected: bool,
    /// Whether detection fell back to comma for lack of a better split.
    pub separator_fallback: bool,
    /// Rows actually loaded (capped by `row_limit`).
    pub total_rows: usize,
    /// Columns actually loaded (capped by the column limit).
    pub total_columns: usize,
    /// Header width in the file, before the column cap.
    pub source_columns: usize,
    /// Row cap in effect for the load.
    pub row_limit: usize,
    /// Rows that repeat an earlier row exactly.
    pub duplicate_row_count: usize,
    /// Column names in file order.
    pub column_names: Vec<String>,
    /// Per-column profiles, keyed by name, in file order.
    pub columns: IndexMap<String, ColumnProfile>,
}

impl DatasetMetadata {
    /// Look up a column profile by name.
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.get(name)
    }

    /// Iterate profiles in file order.
    pub fn profiles(&self) -> impl Iterator<Item = &ColumnProfile> {
        self.columns.values()
    }

    /// Whether the row cap may have cut the file short.
    pub fn possibly_truncated(&self) -> bool {
        self.total_rows >= self.row_limit
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON produced by [`DatasetMetadata::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Short file description embedded in every analyzer result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub file_path: PathBuf,
    pub total_rows: usize,
    pub total_columns: usize,
}

impl From<&DatasetMetadata> for FileInfo {
    fn from(metadata: &DatasetMetadata) -> Self {
        Self {
            file_path: metadata.file_path.clone(),
            total_rows: metadata.total_rows,
            total_columns: metadata.total_columns,
        }
    }
}
