//! Comparison result types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::{Bound, ColumnType, DatasetMetadata};

/// Row counts of the two files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowCountChange {
    pub before: usize,
    pub after: usize,
    /// `after - before`.
    pub difference: i64,
}

/// Column-level differences, independent of row values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralChanges {
    /// Columns present in both files, in file-1 order.
    pub common_columns: Vec<String>,
    pub only_in_file1: Vec<String>,
    pub only_in_file2: Vec<String>,
    /// Whether the common columns appear in a different relative order.
    pub column_order_changed: bool,
    pub row_count_change: RowCountChange,
}

/// Positional value differences in one common column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueChange {
    pub diff_count: usize,
    /// `100 * diff_count / compared_rows`, one decimal.
    pub diff_percentage: f64,
}

/// A common column whose inferred type differs between the files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeChange {
    pub column: String,
    pub before: ColumnType,
    pub after: ColumnType,
}

/// Summary statistics of a common numeric column that moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticChange {
    pub column: String,
    pub mean_before: Option<f64>,
    pub mean_after: Option<f64>,
    pub min_before: Option<Bound>,
    pub min_after: Option<Bound>,
    pub max_before: Option<Bound>,
    pub max_after: Option<Bound>,
    pub null_count_before: usize,
    pub null_count_after: usize,
}

/// Everything `compare` found between two datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub file1: DatasetMetadata,
    pub file2: DatasetMetadata,
    pub structural_changes: StructuralChanges,
    /// Rows compared positionally: `min(rows1, rows2)`.
    pub compared_rows: usize,
    /// Only columns with at least one differing position.
    pub value_changes: IndexMap<String, ValueChange>,
    pub type_changes: Vec<TypeChange>,
    pub statistic_changes: Vec<StatisticChange>,
    pub warnings: Vec<String>,
}

impl ComparisonResult {
    /// Whether the two files hold the same columns, types and values over
    /// the compared rows.
    pub fn is_identical(&self) -> bool {
        let s = &self.structural_changes;
        s.only_in_file1.is_empty()
            && s.only_in_file2.is_empty()
            && !s.column_order_changed
            && s.row_count_change.difference == 0
            && self.value_changes.is_empty()
            && self.type_changes.is_empty()
    }
}
