//! Profiling: type inference, column statistics and the load-then-profile
//! pass.

mod preprocessor;
mod profiler;
pub mod statistics;
pub mod type_inference;

pub use preprocessor::Preprocessor;
pub use profiler::{Profiler, ProfilerConfig};
pub use statistics::StreamingStats;
pub use type_inference::{ParsedValue, infer_column, looks_numeric, looks_temporal, parse_as};

use crate::input::DataTable;
use crate::schema::DatasetMetadata;

/// A profiled dataset: its metadata plus the bounded row slice the metadata
/// was computed from.
///
/// Analyzers that need cell values (positional diffs, z-scores, variant
/// grouping) read them from `table`; everything else uses `metadata`.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub metadata: DatasetMetadata,
    pub table: DataTable,
}

impl Dataset {
    /// Non-null cells of a column, by name.
    pub fn non_null_values(&self, column: &str) -> Vec<&str> {
        self.table
            .column_by_name(column)
            .unwrap_or_default()
            .into_iter()
            .filter(|v| !DataTable::is_null_value(v))
            .collect()
    }
}
