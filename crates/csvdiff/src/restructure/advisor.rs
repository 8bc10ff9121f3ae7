//! Normalization heuristics over a profiled dataset.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{debug, info};

use super::recommendation::{ColumnDefinition, Recommendation, RestructureFormat, RestructureResult};
use crate::config::Thresholds;
use crate::input::DataTable;
use crate::profile::Dataset;
use crate::schema::{ColumnProfile, ColumnType, FileInfo};
use crate::validation::{Detector, Issue, Severity, TypeIssueDetector};

/// Infers primary keys, lookup tables, foreign keys and type conversions.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaAdvisor;

impl SchemaAdvisor {
    pub fn new() -> Self {
        Self
    }

    /// Recommendations in a fixed order: key, lookup tables, foreign keys,
    /// type conversions.
    pub fn derive_restructuring(&self, dataset: &Dataset) -> Vec<Recommendation> {
        let mut recommendations = vec![primary_key(dataset)];
        recommendations.extend(lookup_tables(dataset));
        recommendations.extend(foreign_keys(dataset));
        recommendations.extend(type_conversions(dataset));
        recommendations
    }

    /// Recommendations plus the column mapping a renderer needs.
    /// `table_name` defaults to the file stem.
    pub fn restructure(
        &self,
        dataset: &Dataset,
        format: RestructureFormat,
        table_name: Option<&str>,
    ) -> RestructureResult {
        let metadata = &dataset.metadata;
        let recommendations = self.derive_restructuring(dataset);

        let key_column = recommendations.iter().find_map(|r| match r {
            Recommendation::PrimaryKey {
                column,
                surrogate: false,
                ..
            } => Some(column.as_str()),
            _ => None,
        });

        let columns = metadata
            .profiles()
            .map(|p| ColumnDefinition {
                name: p.name.clone(),
                logical_type: p.inferred_type,
                nullable: p.null_count > 0,
                unique: p.unique,
                max_length: p.string_length.as_ref().map(|s| s.max),
                primary_key: key_column == Some(p.name.as_str()),
            })
            .collect();

        let mut recommendations_by_type: IndexMap<String, usize> = IndexMap::new();
        let mut recommendations_by_severity: IndexMap<Severity, usize> =
            Severity::ALL.iter().map(|s| (*s, 0)).collect();
        for rec in &recommendations {
            *recommendations_by_type.entry(rec.kind().to_string()).or_insert(0) += 1;
            *recommendations_by_severity.entry(rec.severity()).or_insert(0) += 1;
        }

        let table_name = table_name
            .map(str::to_string)
            .unwrap_or_else(|| default_table_name(&metadata.file_name));

        info!(
            "Derived {} restructuring recommendations for {}",
            recommendations.len(),
            table_name
        );

        RestructureResult {
            file_info: FileInfo::from(metadata),
            format,
            table_name,
            columns,
            recommendations,
            recommendations_by_type,
            recommendations_by_severity,
        }
    }
}

/// File stem as an identifier: lower case, non-alphanumerics replaced by
/// underscores.
pub fn default_table_name(file_name: &str) -> String {
    let stem = file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem);
    let name: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if name.is_empty() {
        "data".to_string()
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("t_{}", name)
    } else {
        name
    }
}

fn primary_key(dataset: &Dataset) -> Recommendation {
    let candidates: Vec<&ColumnProfile> = dataset
        .metadata
        .profiles()
        .filter(|p| p.unique && matches!(p.inferred_type, ColumnType::Integer | ColumnType::String))
        .collect();

    // Prefer an id-like name, then an integer column, then file order.
    let chosen = candidates
        .iter()
        .find(|p| looks_like_id(&p.name))
        .or_else(|| candidates.iter().find(|p| p.inferred_type == ColumnType::Integer))
        .or_else(|| candidates.first());

    match chosen {
        Some(p) => Recommendation::PrimaryKey {
            column: p.name.clone(),
            surrogate: false,
            severity: Severity::Low,
            description: format!(
                "'{}' holds a distinct, non-null value in every row and can serve as the primary key",
                p.name
            ),
        },
        None => {
            let taken: HashSet<&str> = dataset
                .metadata
                .column_names
                .iter()
                .map(String::as_str)
                .collect();
            let column = ["id", "row_id", "surrogate_id"]
                .into_iter()
                .find(|c| !taken.contains(c))
                .unwrap_or("surrogate_id")
                .to_string();
            Recommendation::PrimaryKey {
                description: format!(
                    "No column uniquely identifies rows; add a surrogate key '{}'",
                    column
                ),
                column,
                surrogate: true,
                severity: Severity::Medium,
            }
        }
    }
}

fn looks_like_id(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower == "id" || lower.ends_with("_id") || (lower.ends_with("id") && lower.len() <= 4)
}

/// Text columns whose values repeat: at least two distinct values, each
/// seen twice on average.
fn is_lookup_candidate(p: &ColumnProfile) -> bool {
    p.inferred_type == ColumnType::String
        && p.distinct_count >= 2
        && p.distinct_count * 2 <= p.non_null_count
}

fn lookup_tables(dataset: &Dataset) -> Vec<Recommendation> {
    let candidates: Vec<&ColumnProfile> = dataset
        .metadata
        .profiles()
        .filter(|p| is_lookup_candidate(p))
        .collect();

    let mut grouped: HashSet<&str> = HashSet::new();
    let mut recommendations = Vec::new();

    // Most distinct values first: a key can only determine columns no finer
    // than itself.
    let mut keys = candidates.clone();
    keys.sort_by_key(|p| std::cmp::Reverse(p.distinct_count));

    for key in keys {
        if grouped.contains(key.name.as_str()) {
            continue;
        }
        let dependents: Vec<&ColumnProfile> = candidates
            .iter()
            .filter(|other| other.name != key.name && !grouped.contains(other.name.as_str()))
            .filter(|other| other.distinct_count <= key.distinct_count)
            .filter(|other| determines(&dataset.table, key.position, other.position))
            .copied()
            .collect();

        if dependents.is_empty() {
            continue;
        }

        grouped.insert(key.name.as_str());
        let mut columns = vec![key.name.clone()];
        for dep in &dependents {
            grouped.insert(dep.name.as_str());
            columns.push(dep.name.clone());
        }

        debug!("Lookup group keyed by '{}': {:?}", key.name, columns);

        recommendations.push(Recommendation::LookupTable {
            table_name: format!("{}_lookup", default_table_name(&key.name)),
            key_column: key.name.clone(),
            description: format!(
                "Columns {} repeat together over {} distinct '{}' values; move them to a lookup table",
                columns.join(", "),
                key.distinct_count,
                key.name
            ),
            columns,
            distinct_count: key.distinct_count,
            severity: Severity::Medium,
        });
    }

    recommendations
}

/// Whether each value of column `from` maps to exactly one value of column
/// `to`, over rows where both are present.
fn determines(table: &DataTable, from: usize, to: usize) -> bool {
    let mut mapping: HashMap<&str, &str> = HashMap::new();
    table.rows.iter().all(|row| {
        let (Some(a), Some(b)) = (row.get(from), row.get(to)) else {
            return true;
        };
        if DataTable::is_null_value(a) || DataTable::is_null_value(b) {
            return true;
        }
        *mapping.entry(a.as_str()).or_insert(b.as_str()) == b.as_str()
    })
}

fn foreign_keys(dataset: &Dataset) -> Vec<Recommendation> {
    let distinct_sets: Vec<(&ColumnProfile, HashSet<&str>)> = dataset
        .metadata
        .profiles()
        .filter(|p| matches!(p.inferred_type, ColumnType::Integer | ColumnType::String))
        .map(|p| {
            let values = dataset.non_null_values(&p.name).into_iter().map(str::trim).collect();
            (p, values)
        })
        .collect();

    let mut recommendations = Vec::new();
    for (child, child_values) in &distinct_sets {
        // A reference repeats its targets or is named like one; small
        // distinct measures such as quantities are neither.
        let repeats = child.distinct_count < child.non_null_count;
        if child_values.is_empty() || !(repeats || looks_like_id(&child.name)) {
            continue;
        }
        // Referenced columns must be keys themselves.
        for (parent, parent_values) in distinct_sets.iter().filter(|(p, _)| p.unique) {
            if parent.name == child.name
                || parent.inferred_type != child.inferred_type
                || child_values.len() >= parent_values.len()
                || !child_values.is_subset(parent_values)
            {
                continue;
            }
            recommendations.push(Recommendation::ForeignKey {
                column: child.name.clone(),
                references_column: parent.name.clone(),
                severity: Severity::Low,
                description: format!(
                    "Every value of '{}' appears in '{}'; '{}' may reference '{}'",
                    child.name, parent.name, child.name, parent.name
                ),
            });
        }
    }
    recommendations
}

fn type_conversions(dataset: &Dataset) -> Vec<Recommendation> {
    TypeIssueDetector
        .detect(dataset, &Thresholds::default())
        .into_iter()
        .filter_map(|issue| match issue {
            Issue::TypeIssues {
                column,
                current_type,
                suggested_type,
                ..
            } => Some(Recommendation::TypeConversion {
                description: format!(
                    "Store '{}' as {} instead of {}",
                    column, suggested_type, current_type
                ),
                column,
                current_type,
                suggested_type,
                severity: Severity::Medium,
            }),
            _ => None,
        })
        .collect()
}
