//! Rule-based mapping from validation issues to cleaning steps.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::info;
use serde_json::json;

use super::step::{CleaningAction, CleaningPlan, CleaningStep, PotentialImpact};
use crate::config::CleaningConfig;
use crate::error::Result;
use crate::schema::DatasetMetadata;
use crate::validation::{Issue, IssueCategory, Severity, ValidationResult};

/// Derives cleaning steps from a [`ValidationResult`].
pub struct CleaningAdvisor {
    config: CleaningConfig,
}

impl CleaningAdvisor {
    pub fn new() -> Self {
        Self {
            config: CleaningConfig::default(),
        }
    }

    pub fn with_config(config: CleaningConfig) -> Self {
        Self { config }
    }

    /// Steps for every issue, ordered by descending severity, then column
    /// name. Steps for the same issue keep their relative order.
    pub fn derive_cleaning_steps(
        &self,
        validation: &ValidationResult,
        metadata: &DatasetMetadata,
    ) -> Result<Vec<CleaningStep>> {
        self.config.validate()?;

        let mut steps: Vec<CleaningStep> = validation
            .all_issues()
            .flat_map(|issue| self.steps_for_issue(issue, metadata))
            .collect();

        steps.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then_with(|| a.column.cmp(&b.column))
        });

        Ok(steps)
    }

    /// Steps plus their estimated impact.
    pub fn plan(
        &self,
        validation: &ValidationResult,
        metadata: &DatasetMetadata,
    ) -> Result<CleaningPlan> {
        let steps = self.derive_cleaning_steps(validation, metadata)?;
        let potential_impact = estimate_impact(&steps, metadata);

        info!(
            "Derived {} cleaning steps for {}",
            steps.len(),
            metadata.file_name
        );

        Ok(CleaningPlan {
            file_info: validation.file_info.clone(),
            steps,
            potential_impact,
        })
    }

    fn steps_for_issue(&self, issue: &Issue, metadata: &DatasetMetadata) -> Vec<CleaningStep> {
        let severity = issue.severity();
        let category = issue.category();

        match issue {
            Issue::MissingValues {
                column,
                null_count,
                null_percentage,
                ..
            } => self.suggest_missing(column, *null_count, *null_percentage, severity, metadata),

            Issue::Outliers {
                column,
                outlier_count,
                z_threshold,
                ..
            } => {
                let profile = metadata.column(column);
                let bounds = profile.and_then(|p| Some((p.mean?, p.std?))).map(|(mean, std)| {
                    json!({
                        "lower": mean - z_threshold * std,
                        "upper": mean + z_threshold * std,
                    })
                });
                vec![
                    CleaningStep::new(
                        category,
                        column,
                        CleaningAction::Winsorize,
                        severity,
                        format!(
                            "Clamp the {} extreme value(s) in '{}' to the {}th and {}th percentiles",
                            outlier_count,
                            column,
                            self.config.winsorize_lower * 100.0,
                            self.config.winsorize_upper * 100.0
                        ),
                    )
                    .with_parameters(json!({
                        "lower_quantile": self.config.winsorize_lower,
                        "upper_quantile": self.config.winsorize_upper,
                    }))
                    .with_affected_rows(*outlier_count),
                    CleaningStep::new(
                        category,
                        column,
                        CleaningAction::Cap,
                        severity,
                        format!(
                            "Alternatively cap '{}' at mean +/- {} standard deviations",
                            column, z_threshold
                        ),
                    )
                    .with_parameters(bounds.unwrap_or_default())
                    .with_affected_rows(*outlier_count),
                ]
            }

            Issue::TypeIssues {
                column,
                current_type,
                suggested_type,
                ..
            } => {
                let affected = metadata.column(column).map_or(0, |p| p.non_null_count);
                vec![
                    CleaningStep::new(
                        category,
                        column,
                        CleaningAction::ConvertType,
                        severity,
                        format!(
                            "Convert '{}' from {} to {}, stripping symbols and separators first",
                            column, current_type, suggested_type
                        ),
                    )
                    .with_parameters(json!({
                        "from": current_type,
                        "to": suggested_type,
                    }))
                    .with_affected_rows(affected),
                ]
            }

            Issue::InconsistentValues {
                column,
                variant_groups,
                affected_count,
                ..
            } => {
                let mapping: IndexMap<&str, &str> = variant_groups
                    .iter()
                    .flat_map(|g| {
                        g.variants
                            .iter()
                            .filter(move |v| **v != g.dominant)
                            .map(move |v| (v.as_str(), g.dominant.as_str()))
                    })
                    .collect();
                vec![
                    CleaningStep::new(
                        category,
                        column,
                        CleaningAction::NormalizeValues,
                        severity,
                        format!(
                            "Map {} spelling variant(s) in '{}' to their most common form",
                            mapping.len(),
                            column
                        ),
                    )
                    .with_parameters(json!({ "mapping": mapping }))
                    .with_affected_rows(*affected_count),
                ]
            }

            Issue::HighCardinality {
                column,
                unique_percentage,
                ..
            } => {
                if *unique_percentage >= 100.0 {
                    vec![CleaningStep::new(
                        category,
                        column,
                        CleaningAction::TreatAsIdentifier,
                        severity,
                        format!(
                            "Every value in '{}' is distinct; treat it as an identifier, not a feature",
                            column
                        ),
                    )]
                } else {
                    vec![
                        CleaningStep::new(
                            category,
                            column,
                            CleaningAction::GroupRareCategories,
                            severity,
                            format!(
                                "Group infrequent values of '{}' into an 'Other' category",
                                column
                            ),
                        )
                        .with_parameters(json!({ "min_frequency": 2, "other_label": "Other" })),
                    ]
                }
            }
        }
    }

    fn suggest_missing(
        &self,
        column: &str,
        null_count: usize,
        null_percentage: f64,
        severity: Severity,
        metadata: &DatasetMetadata,
    ) -> Vec<CleaningStep> {
        let category = IssueCategory::MissingValues;
        let mut steps = Vec::new();

        if null_percentage <= self.config.drop_rows_threshold {
            steps.push(
                CleaningStep::new(
                    category,
                    column,
                    CleaningAction::Dropna,
                    severity,
                    format!(
                        "Only {:.2}% of '{}' is missing; dropping those rows loses little data",
                        null_percentage, column
                    ),
                )
                .with_parameters(json!({ "subset": [column] }))
                .with_affected_rows(null_count),
            );
        } else {
            let numeric = metadata
                .column(column)
                .is_some_and(|p| p.inferred_type.is_numeric());
            let strategy = if numeric { "median" } else { "mode" };
            steps.push(
                CleaningStep::new(
                    category,
                    column,
                    CleaningAction::Fillna,
                    severity,
                    format!(
                        "{:.2}% of '{}' is missing; fill with the column {}",
                        null_percentage, column, strategy
                    ),
                )
                .with_parameters(json!({ "strategy": strategy }))
                .with_affected_rows(null_count),
            );
        }

        if null_percentage >= self.config.drop_column_threshold {
            steps.push(
                CleaningStep::new(
                    category,
                    column,
                    CleaningAction::DropColumn,
                    severity,
                    format!(
                        "'{}' is mostly empty ({:.2}% missing); consider dropping the column",
                        column, null_percentage
                    ),
                )
                .with_affected_rows(metadata.total_rows),
            );
        }

        steps
    }
}

impl Default for CleaningAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

fn estimate_impact(steps: &[CleaningStep], metadata: &DatasetMetadata) -> PotentialImpact {
    let rows_removed: usize = steps
        .iter()
        .filter(|s| s.action.removes_rows())
        .map(|s| s.affected_rows)
        .sum();

    // Winsorize and cap are alternatives; count a column's outliers once.
    let mut counted_outliers: HashSet<&str> = HashSet::new();
    let values_modified: usize = steps
        .iter()
        .filter(|s| match s.action {
            CleaningAction::Fillna | CleaningAction::ConvertType | CleaningAction::NormalizeValues => {
                true
            }
            CleaningAction::Winsorize | CleaningAction::Cap => {
                counted_outliers.insert(s.column.as_str())
            }
            _ => false,
        })
        .map(|s| s.affected_rows)
        .sum();

    let columns_dropped = steps
        .iter()
        .filter(|s| s.action == CleaningAction::DropColumn)
        .map(|s| s.column.clone())
        .collect();

    let touched: HashSet<&str> = steps.iter().map(|s| s.column.as_str()).collect();
    let columns_affected = metadata
        .column_names
        .iter()
        .filter(|c| touched.contains(c.as_str()))
        .cloned()
        .collect();

    let mut steps_by_severity: IndexMap<Severity, usize> =
        Severity::ALL.iter().map(|s| (*s, 0)).collect();
    for step in steps {
        *steps_by_severity.entry(step.severity).or_insert(0) += 1;
    }

    PotentialImpact {
        estimated_rows_removed: rows_removed.min(metadata.total_rows),
        estimated_values_modified: values_modified,
        columns_dropped,
        columns_affected,
        steps_by_severity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;
    use crate::input::{DataTable, SourceInfo};
    use crate::profile::{Dataset, Profiler};
    use crate::validation::ValidationEngine;
    use std::path::PathBuf;

    fn dataset(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> Dataset {
        let table = DataTable::new(
            headers.into_iter().map(String::from).collect(),
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
            b',',
        );
        let source = SourceInfo {
            path: PathBuf::from("test.csv"),
            file_name: "test.csv".to_string(),
            size_bytes: 1,
            separator: b',',
            separator_detected: true,
            separator_fallback: false,
            source_columns: table.column_count(),
            row_limit: 1000,
        };
        let metadata = Profiler::new().profile(&table, &source);
        Dataset { metadata, table }
    }

    fn plan_for(data: &Dataset, thresholds: Thresholds) -> CleaningPlan {
        let validation = ValidationEngine::new().validate(data, &thresholds).unwrap();
        CleaningAdvisor::new().plan(&validation, &data.metadata).unwrap()
    }

    #[test]
    fn test_missing_values_steps() {
        let data = dataset(
            vec!["id", "name", "value"],
            vec![
                vec!["1", "Alice", "10"],
                vec!["2", "Bob", ""],
                vec!["3", "Charlie", "30"],
                vec!["4", "", "40"],
                vec!["5", "Eve", "50"],
            ],
        );
        let plan = plan_for(
            &data,
            Thresholds {
                null_threshold: 1.0,
                cardinality_threshold: 100.0,
                ..Default::default()
            },
        );

        let missing: Vec<&CleaningStep> = plan
            .steps
            .iter()
            .filter(|s| s.issue_type == IssueCategory::MissingValues)
            .collect();
        assert_eq!(missing.len(), 2);
        assert!(missing.iter().all(|s| s.action == CleaningAction::Fillna));
        assert_eq!(missing[0].column, "name");
        assert_eq!(missing[0].parameters["strategy"], "mode");
        assert_eq!(missing[1].column, "value");
        assert_eq!(missing[1].parameters["strategy"], "median");
        assert_eq!(plan.potential_impact.estimated_values_modified, 2);
    }

    #[test]
    fn test_outlier_steps() {
        let data = dataset(
            vec!["id", "value"],
            vec![
                vec!["1", "10"],
                vec!["2", "12"],
                vec!["3", "9"],
                vec!["4", "11"],
                vec!["5", "100"],
            ],
        );
        let plan = plan_for(
            &data,
            Thresholds {
                outlier_threshold: 1.0,
                ..Default::default()
            },
        );

        let actions: Vec<CleaningAction> = plan
            .steps
            .iter()
            .filter(|s| s.column == "value")
            .map(|s| s.action)
            .collect();
        assert_eq!(actions, vec![CleaningAction::Winsorize, CleaningAction::Cap]);
        // id 1 and 5 also exceed |z| = 1; each column counted once
        assert_eq!(plan.potential_impact.estimated_values_modified, 3);
    }

    #[test]
    fn test_sparse_column_gets_drop_column() {
        let data = dataset(
            vec!["a", "b"],
            vec![vec!["1", ""], vec!["2", ""], vec!["3", "x"], vec!["4", ""]],
        );
        let plan = plan_for(
            &data,
            Thresholds {
                cardinality_threshold: 100.0,
                ..Default::default()
            },
        );

        let actions: Vec<CleaningAction> = plan.steps.iter().map(|s| s.action).collect();
        assert_eq!(actions, vec![CleaningAction::Fillna, CleaningAction::DropColumn]);
        assert_eq!(plan.steps[0].severity, Severity::High);
        assert_eq!(plan.potential_impact.columns_dropped, vec!["b"]);
    }

    #[test]
    fn test_steps_ordered_by_severity_then_column() {
        let data = dataset(
            vec!["z", "a", "m"],
            vec![
                vec!["", "", "1"],
                vec!["", "x", ""],
                vec!["1", "y", "3"],
                vec!["2", "z", "4"],
            ],
        );
        let validation = ValidationEngine::new()
            .validate(
                &data,
                &Thresholds {
                    cardinality_threshold: 100.0,
                    ..Default::default()
                },
            )
            .unwrap();
        let steps = CleaningAdvisor::new()
            .derive_cleaning_steps(&validation, &data.metadata)
            .unwrap();

        // z: 50% (high), a and m: 25% (medium)
        let columns: Vec<&str> = steps
            .iter()
            .filter(|s| s.action == CleaningAction::Fillna)
            .map(|s| s.column.as_str())
            .collect();
        assert_eq!(columns, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_low_missing_share_drops_rows() {
        let mut rows: Vec<Vec<&str>> = (0..25).map(|_| vec!["v"]).collect();
        rows[3] = vec![""];
        let data = dataset(vec!["c"], rows);
        let plan = plan_for(
            &data,
            Thresholds {
                null_threshold: 1.0,
                cardinality_threshold: 100.0,
                ..Default::default()
            },
        );

        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.steps[0].action, CleaningAction::Dropna);
        assert_eq!(plan.potential_impact.estimated_rows_removed, 1);
    }

    #[test]
    fn test_defaults_drop_rows_just_above_null_threshold() {
        // 6 of 100 missing: reported at the default 5%, dropped at the default 10%
        let rows: Vec<Vec<&str>> = (0..100)
            .map(|i| if i % 17 == 0 { vec![""] } else { vec!["42"] })
            .collect();
        let data = dataset(vec!["qty"], rows);
        let plan = plan_for(&data, Thresholds::default());

        let actions: Vec<CleaningAction> = plan
            .steps
            .iter()
            .filter(|s| s.issue_type == IssueCategory::MissingValues)
            .map(|s| s.action)
            .collect();
        assert_eq!(actions, vec![CleaningAction::Dropna]);
        assert_eq!(plan.steps[0].affected_rows, 6);
        assert_eq!(plan.steps[0].parameters["subset"][0], "qty");
    }
}
