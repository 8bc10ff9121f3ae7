//! Structural and positional value diff between two datasets.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, info};

use super::result::{
    ComparisonResult, RowCountChange, StatisticChange, StructuralChanges, TypeChange, ValueChange,
};
use crate::input::DataTable;
use crate::profile::Dataset;
use crate::profile::statistics::{percentage, round_to};
use crate::profile::type_inference::{ParsedValue, parse_as};
use crate::schema::{Bound, ColumnProfile, ColumnType, DatasetMetadata, TypeFamily};

/// Compares two profiled datasets.
///
/// Rows are aligned by position, not by key: row `i` of the first file is
/// compared with row `i` of the second, over the rows both files have.
#[derive(Debug, Default, Clone, Copy)]
pub struct Comparator;

impl Comparator {
    pub fn new() -> Self {
        Self
    }

    pub fn compare(&self, first: &Dataset, second: &Dataset) -> ComparisonResult {
        let m1 = &first.metadata;
        let m2 = &second.metadata;

        let structural_changes = structural_diff(m1, m2);
        let compared_rows = first.table.row_count().min(second.table.row_count());

        let mut value_changes = IndexMap::new();
        let mut type_changes = Vec::new();
        let mut statistic_changes = Vec::new();

        for name in &structural_changes.common_columns {
            let (Some(p1), Some(p2)) = (m1.column(name), m2.column(name)) else {
                continue;
            };

            if p1.inferred_type != p2.inferred_type {
                type_changes.push(TypeChange {
                    column: name.clone(),
                    before: p1.inferred_type,
                    after: p2.inferred_type,
                });
            }

            if p1.inferred_type.family() != p2.inferred_type.family() {
                debug!(
                    "Skipping value diff for '{}': {} vs {}",
                    name, p1.inferred_type, p2.inferred_type
                );
                continue;
            }

            let diff_count = count_differences(
                &first.table,
                p1,
                &second.table,
                p2,
                compared_rows,
            );
            if diff_count > 0 {
                value_changes.insert(
                    name.clone(),
                    ValueChange {
                        diff_count,
                        diff_percentage: round_to(percentage(diff_count, compared_rows), 1),
                    },
                );
            }

            if p1.inferred_type.is_numeric() && p2.inferred_type.is_numeric() {
                if let Some(change) = statistic_change(p1, p2) {
                    statistic_changes.push(change);
                }
            }
        }

        let warnings = collect_warnings(m1, m2, &structural_changes, compared_rows);

        info!(
            "Compared {} and {}: {} common columns, {} with value changes",
            m1.file_name,
            m2.file_name,
            structural_changes.common_columns.len(),
            value_changes.len()
        );

        ComparisonResult {
            file1: m1.clone(),
            file2: m2.clone(),
            structural_changes,
            compared_rows,
            value_changes,
            type_changes,
            statistic_changes,
            warnings,
        }
    }
}

fn structural_diff(m1: &DatasetMetadata, m2: &DatasetMetadata) -> StructuralChanges {
    let names1: HashSet<&str> = m1.column_names.iter().map(String::as_str).collect();
    let names2: HashSet<&str> = m2.column_names.iter().map(String::as_str).collect();

    let common_columns: Vec<String> = m1
        .column_names
        .iter()
        .filter(|c| names2.contains(c.as_str()))
        .cloned()
        .collect();
    let only_in_file1 = m1
        .column_names
        .iter()
        .filter(|c| !names2.contains(c.as_str()))
        .cloned()
        .collect();
    let only_in_file2 = m2
        .column_names
        .iter()
        .filter(|c| !names1.contains(c.as_str()))
        .cloned()
        .collect();

    let order_in_file2: Vec<&String> = m2
        .column_names
        .iter()
        .filter(|c| names1.contains(c.as_str()))
        .collect();
    let column_order_changed = !common_columns.iter().eq(order_in_file2);

    StructuralChanges {
        common_columns,
        only_in_file1,
        only_in_file2,
        column_order_changed,
        row_count_change: RowCountChange {
            before: m1.total_rows,
            after: m2.total_rows,
            difference: m2.total_rows as i64 - m1.total_rows as i64,
        },
    }
}

fn count_differences(
    t1: &DataTable,
    p1: &ColumnProfile,
    t2: &DataTable,
    p2: &ColumnProfile,
    rows: usize,
) -> usize {
    t1.column_values(p1.position)
        .zip(t2.column_values(p2.position))
        .take(rows)
        .filter(|(a, b)| !cells_equal(a, p1.inferred_type, b, p2.inferred_type))
        .count()
}

/// Two nulls are equal; a null and a value are not. Present values compare
/// within their type family.
fn cells_equal(a: &str, type_a: ColumnType, b: &str, type_b: ColumnType) -> bool {
    match (DataTable::is_null_value(a), DataTable::is_null_value(b)) {
        (true, true) => return true,
        (true, false) | (false, true) => return false,
        (false, false) => {}
    }

    let (pa, pb) = (parse_as(type_a, a), parse_as(type_b, b));
    match (type_a.family(), pa, pb) {
        (TypeFamily::Numeric, Some(x), Some(y)) => x.as_f64() == y.as_f64(),
        (TypeFamily::Boolean, Some(ParsedValue::Boolean(x)), Some(ParsedValue::Boolean(y))) => {
            x == y
        }
        (TypeFamily::Temporal, Some(x), Some(y)) => x.as_datetime() == y.as_datetime(),
        _ => a == b,
    }
}

fn statistic_change(p1: &ColumnProfile, p2: &ColumnProfile) -> Option<StatisticChange> {
    let moved = p1.mean != p2.mean
        || bound_moved(&p1.min, &p2.min)
        || bound_moved(&p1.max, &p2.max)
        || p1.null_count != p2.null_count;

    moved.then(|| StatisticChange {
        column: p1.name.clone(),
        mean_before: p1.mean,
        mean_after: p2.mean,
        min_before: p1.min.clone(),
        min_after: p2.min.clone(),
        max_before: p1.max.clone(),
        max_after: p2.max.clone(),
        null_count_before: p1.null_count,
        null_count_after: p2.null_count,
    })
}

fn bound_moved(before: &Option<Bound>, after: &Option<Bound>) -> bool {
    before.as_ref().and_then(Bound::as_f64) != after.as_ref().and_then(Bound::as_f64)
}

fn collect_warnings(
    m1: &DatasetMetadata,
    m2: &DatasetMetadata,
    structural: &StructuralChanges,
    compared_rows: usize,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if structural.row_count_change.difference != 0 {
        warnings.push(format!(
            "Row counts differ ({} vs {}); values were compared by position over the first {} rows",
            m1.total_rows, m2.total_rows, compared_rows
        ));
    }
    if structural.column_order_changed {
        warnings.push("Common columns appear in a different order".to_string());
    }
    for m in [m1, m2] {
        if m.possibly_truncated() {
            warnings.push(format!(
                "{} was capped at {} rows; later rows were not compared",
                m.file_name, m.row_limit
            ));
        }
    }

    warnings
}
