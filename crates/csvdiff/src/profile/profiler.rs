//! Per-column statistical profiling of a loaded table.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use super::statistics::{StreamingStats, percentage, round_to};
use super::type_inference::{ParsedValue, infer_column};
use crate::input::{DataTable, SourceInfo};
use crate::schema::{Bound, ColumnProfile, ColumnType, DatasetMetadata, LengthStatistics};

/// Profiler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilerConfig {
    /// Columns with at most this many distinct values carry their full
    /// value list in `sample_values`.
    pub categorical_ceiling: usize,
    /// Maximum entries kept in `sample_values`.
    pub sample_size: usize,
    /// Number of example values kept for every column.
    pub example_count: usize,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            categorical_ceiling: 20,
            sample_size: 20,
            example_count: 5,
        }
    }
}

/// Turns a [`DataTable`] into [`DatasetMetadata`].
pub struct Profiler {
    config: ProfilerConfig,
}

impl Profiler {
    /// Create a profiler with default settings.
    pub fn new() -> Self {
        Self {
            config: ProfilerConfig::default(),
        }
    }

    /// Create a profiler with custom settings.
    pub fn with_config(config: ProfilerConfig) -> Self {
        Self { config }
    }

    /// Profile every column of the table.
    pub fn profile(&self, table: &DataTable, source: &SourceInfo) -> DatasetMetadata {
        let columns: IndexMap<String, ColumnProfile> = (0..table.column_count())
            .map(|idx| {
                let profile = self.profile_column(table, idx);
                (profile.name.clone(), profile)
            })
            .collect();

        DatasetMetadata {
            file_path: source.path.clone(),
            file_name: source.file_name.clone(),
            file_size_bytes: source.size_bytes,
            separator: source.separator as char,
            separator_detected: source.separator_detected,
            separator_fallback: source.separator_fallback,
            total_rows: table.row_count(),
            total_columns: table.column_count(),
            source_columns: source.source_columns,
            row_limit: source.row_limit,
            duplicate_row_count: count_duplicate_rows(table),
            column_names: table.headers.clone(),
            columns,
        }
    }

    /// Profile a single column by position.
    pub fn profile_column(&self, table: &DataTable, index: usize) -> ColumnProfile {
        let name = table.headers.get(index).cloned().unwrap_or_default();
        let total = table.row_count();

        let non_null: Vec<&str> = table
            .column_values(index)
            .filter(|v| !DataTable::is_null_value(v))
            .collect();
        let null_count = total - non_null.len();

        let (inferred_type, parsed) = infer_column(&non_null);

        // Distinct values keyed by parsed value, displayed as first seen.
        let mut distinct: IndexMap<String, &str> = IndexMap::new();
        for (raw, value) in non_null.iter().zip(&parsed) {
            distinct.entry(value.canonical_key()).or_insert(raw);
        }
        let distinct_count = distinct.len();

        let sample_values = if distinct_count <= self.config.categorical_ceiling {
            distinct
                .values()
                .take(self.config.sample_size)
                .map(|v| v.to_string())
                .collect()
        } else {
            Vec::new()
        };
        let examples = distinct
            .values()
            .take(self.config.example_count)
            .map(|v| v.to_string())
            .collect();

        let mut profile = ColumnProfile {
            name,
            position: index,
            inferred_type,
            null_count,
            non_null_count: non_null.len(),
            null_percentage: round_to(percentage(null_count, total), 2),
            distinct_count,
            unique: total > 0 && null_count == 0 && distinct_count == total,
            min: None,
            max: None,
            mean: None,
            std: None,
            sample_values,
            examples,
            string_length: None,
        };

        match inferred_type {
            ColumnType::Integer | ColumnType::Float => {
                fill_numeric(&mut profile, &parsed);
            }
            ColumnType::Date | ColumnType::DateTime => {
                fill_temporal(&mut profile, &parsed);
            }
            ColumnType::String => {
                profile.string_length = length_statistics(&non_null);
            }
            ColumnType::Boolean => {}
        }

        debug!(
            "Profiled column '{}': {} ({} nulls, {} distinct)",
            profile.name, profile.inferred_type, profile.null_count, profile.distinct_count
        );

        profile
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

fn fill_numeric(profile: &mut ColumnProfile, parsed: &[ParsedValue]) {
    let stats: StreamingStats = parsed.iter().filter_map(ParsedValue::as_f64).collect();
    profile.mean = stats.mean();
    profile.std = stats.std();

    if profile.inferred_type == ColumnType::Integer {
        let ints = parsed.iter().filter_map(|v| match v {
            ParsedValue::Integer(i) => Some(*i),
            _ => None,
        });
        let (min, max) = ints.fold((None, None), |(lo, hi): (Option<i64>, Option<i64>), v| {
            (
                Some(lo.map_or(v, |l| l.min(v))),
                Some(hi.map_or(v, |h| h.max(v))),
            )
        });
        profile.min = min.map(Bound::Integer);
        profile.max = max.map(Bound::Integer);
    } else {
        profile.min = stats.min().map(Bound::Float);
        profile.max = stats.max().map(Bound::Float);
    }
}

fn fill_temporal(profile: &mut ColumnProfile, parsed: &[ParsedValue]) {
    let instants = parsed.iter().filter_map(ParsedValue::as_datetime);
    let min = instants.clone().min();
    let max = instants.max();

    let format = if profile.inferred_type == ColumnType::Date {
        "%Y-%m-%d"
    } else {
        "%Y-%m-%dT%H:%M:%S%.f"
    };
    profile.min = min.map(|dt| Bound::Temporal(dt.format(format).to_string()));
    profile.max = max.map(|dt| Bound::Temporal(dt.format(format).to_string()));
}

fn length_statistics(values: &[&str]) -> Option<LengthStatistics> {
    if values.is_empty() {
        return None;
    }
    let lengths: Vec<usize> = values.iter().map(|v| v.chars().count()).collect();
    Some(LengthStatistics {
        min: lengths.iter().copied().min().unwrap_or(0),
        max: lengths.iter().copied().max().unwrap_or(0),
        mean: round_to(lengths.iter().sum::<usize>() as f64 / lengths.len() as f64, 2),
    })
}

fn count_duplicate_rows(table: &DataTable) -> usize {
    let mut seen: HashSet<&Vec<String>> = HashSet::with_capacity(table.row_count());
    table.rows.iter().filter(|row| !seen.insert(*row)).count()
}
