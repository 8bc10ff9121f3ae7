//! Per-column statistical profile.

use serde::{Deserialize, Serialize};

use super::types::{Bound, ColumnType};

/// Length statistics for text columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthStatistics {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
}

/// Profile of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Zero-based position in the loaded table.
    pub position: usize,
    /// Inferred data type.
    pub inferred_type: ColumnType,
    /// Number of null/missing values.
    pub null_count: usize,
    /// Number of present values.
    pub non_null_count: usize,
    /// Share of nulls among loaded rows, in percent (two decimals).
    pub null_percentage: f64,
    /// Number of distinct non-null values.
    pub distinct_count: usize,
    /// Whether every row holds a distinct, present value.
    pub unique: bool,
    /// Smallest value (numeric and temporal columns).
    pub min: Option<Bound>,
    /// Largest value (numeric and temporal columns).
    pub max: Option<Bound>,
    /// Arithmetic mean (numeric columns).
    pub mean: Option<f64>,
    /// Population standard deviation (numeric columns).
    pub std: Option<f64>,
    /// Every distinct value, in first-seen order, when the column is under
    /// the categorical ceiling. Empty otherwise.
    #[serde(default)]
    pub sample_values: Vec<String>,
    /// First few distinct values, for display.
    #[serde(default)]
    pub examples: Vec<String>,
    /// Length statistics (text columns).
    pub string_length: Option<LengthStatistics>,
}

impl ColumnProfile {
    /// Total rows the profile was computed over.
    pub fn total_count(&self) -> usize {
        self.null_count + self.non_null_count
    }

    /// Whether `sample_values` lists the full value domain.
    pub fn is_categorical(&self) -> bool {
        self.distinct_count > 0 && self.sample_values.len() == self.distinct_count
    }

    /// Distinct values as a share of loaded rows, in percent.
    pub fn distinct_percentage(&self) -> f64 {
        let total = self.total_count();
        if total == 0 {
            0.0
        } else {
            self.distinct_count as f64 / total as f64 * 100.0
        }
    }
}
