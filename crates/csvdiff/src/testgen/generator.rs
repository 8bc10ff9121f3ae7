//! Translation of profile facts and validation issues into test specs.

use indexmap::IndexMap;
use log::info;
use serde_json::json;

use super::spec::{GeneratedTests, TestFramework, TestSpec, TestSubtype, TestType};
use crate::config::Thresholds;
use crate::error::Result;
use crate::schema::{ColumnProfile, ColumnType, DatasetMetadata, FileInfo};
use crate::validation::{Issue, IssueCategory, Severity, ValidationResult};

/// Builds [`TestSpec`]s from observed data.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestSpecGenerator;

impl TestSpecGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Table-level schema tests first, then each column's tests in file
    /// order, then the duplicate-row check.
    pub fn derive_test_specs(
        &self,
        metadata: &DatasetMetadata,
        validation: &ValidationResult,
        thresholds: &Thresholds,
    ) -> Result<Vec<TestSpec>> {
        thresholds.validate()?;

        let mut tests = vec![
            TestSpec::table(
                TestSubtype::ColumnCount,
                Severity::High,
                format!("Table has exactly {} columns", metadata.total_columns),
            )
            .with_parameters(json!({ "expected": metadata.total_columns })),
            TestSpec::table(
                TestSubtype::ColumnNames,
                Severity::High,
                "Table has the expected column names in order",
            )
            .with_parameters(json!({ "expected": metadata.column_names })),
        ];

        for profile in metadata.profiles() {
            tests.extend(column_tests(profile, validation, thresholds));
        }

        let duplicates = metadata.duplicate_row_count;
        tests.push(
            TestSpec::table(
                TestSubtype::Duplicates,
                if duplicates == 0 {
                    Severity::Medium
                } else {
                    Severity::Low
                },
                format!("Table has at most {} duplicate rows", duplicates),
            )
            .with_parameters(json!({ "max_duplicates": duplicates })),
        );

        Ok(tests)
    }

    /// Specs plus counts by type and severity.
    pub fn generate(
        &self,
        metadata: &DatasetMetadata,
        validation: &ValidationResult,
        thresholds: &Thresholds,
        framework: TestFramework,
    ) -> Result<GeneratedTests> {
        let tests = self.derive_test_specs(metadata, validation, thresholds)?;

        let mut tests_by_type: IndexMap<TestType, usize> = [
            TestType::Schema,
            TestType::Value,
            TestType::Quality,
            TestType::Relationship,
        ]
        .into_iter()
        .map(|t| (t, 0))
        .collect();
        let mut tests_by_severity: IndexMap<Severity, usize> =
            Severity::ALL.iter().map(|s| (*s, 0)).collect();
        for test in &tests {
            *tests_by_type.entry(test.test_type).or_insert(0) += 1;
            *tests_by_severity.entry(test.severity).or_insert(0) += 1;
        }

        info!(
            "Generated {} {} tests for {}",
            tests.len(),
            framework,
            metadata.file_name
        );

        Ok(GeneratedTests {
            file_info: FileInfo::from(metadata),
            framework,
            test_count: tests.len(),
            tests_by_type,
            tests_by_severity,
            tests,
        })
    }
}

fn column_tests(
    profile: &ColumnProfile,
    validation: &ValidationResult,
    thresholds: &Thresholds,
) -> Vec<TestSpec> {
    let name = profile.name.as_str();
    let mut tests = vec![
        TestSpec::column(
            TestSubtype::ColumnType,
            name,
            Severity::Medium,
            format!("'{}' has type {}", name, profile.inferred_type),
        )
        .with_parameters(json!({ "expected_type": profile.inferred_type })),
    ];

    if profile.inferred_type.is_numeric() || profile.inferred_type.is_temporal() {
        if let Some(min) = &profile.min {
            tests.push(
                TestSpec::column(
                    TestSubtype::Minimum,
                    name,
                    Severity::Medium,
                    format!("'{}' is at least {}", name, min),
                )
                .with_parameters(json!({ "min_value": min })),
            );
        }
        if let Some(max) = &profile.max {
            tests.push(
                TestSpec::column(
                    TestSubtype::Maximum,
                    name,
                    Severity::Medium,
                    format!("'{}' is at most {}", name, max),
                )
                .with_parameters(json!({ "max_value": max })),
            );
        }
    }

    if profile.inferred_type == ColumnType::String && profile.is_categorical() && !profile.unique {
        tests.push(
            TestSpec::column(
                TestSubtype::Categorical,
                name,
                Severity::Medium,
                format!(
                    "'{}' only holds one of {} known values",
                    name, profile.distinct_count
                ),
            )
            .with_parameters(json!({ "allowed_values": profile.sample_values })),
        );
    }

    if let Some(lengths) = &profile.string_length {
        tests.push(
            TestSpec::column(
                TestSubtype::StringLength,
                name,
                Severity::Low,
                format!(
                    "'{}' values are {} to {} characters long",
                    name, lengths.min, lengths.max
                ),
            )
            .with_parameters(json!({ "min_length": lengths.min, "max_length": lengths.max })),
        );
    }

    if profile.null_count == 0 {
        tests.push(TestSpec::column(
            TestSubtype::NoNulls,
            name,
            Severity::High,
            format!("'{}' has no missing values", name),
        ));
    } else {
        let flagged = validation
            .issues_of(IssueCategory::MissingValues)
            .iter()
            .any(|i| i.column() == name);
        // Allow what was observed when it already exceeds the threshold.
        let max_null_percentage = thresholds.null_threshold.max(profile.null_percentage);
        tests.push(
            TestSpec::column(
                TestSubtype::LimitedNulls,
                name,
                if flagged {
                    Severity::Medium
                } else {
                    Severity::Low
                },
                format!("'{}' is at most {}% missing", name, max_null_percentage),
            )
            .with_parameters(json!({ "max_null_percentage": max_null_percentage })),
        );
    }

    if profile.inferred_type.is_numeric() && profile.std.is_some_and(|s| s > 0.0) {
        let observed = validation
            .issues_of(IssueCategory::Outliers)
            .iter()
            .find_map(|i| match i {
                Issue::Outliers {
                    column,
                    outlier_count,
                    ..
                } if column == name => Some(*outlier_count),
                _ => None,
            })
            .unwrap_or(0);
        tests.push(
            TestSpec::column(
                TestSubtype::Outliers,
                name,
                if observed > 0 {
                    Severity::Medium
                } else {
                    Severity::Low
                },
                format!(
                    "'{}' has at most {} values beyond {} standard deviations",
                    name, observed, thresholds.outlier_threshold
                ),
            )
            .with_parameters(json!({
                "z_threshold": thresholds.outlier_threshold,
                "max_outliers": observed,
                "mean": profile.mean,
                "std": profile.std,
            })),
        );
    }

    if profile.unique {
        tests.push(TestSpec::column(
            TestSubtype::UniqueValues,
            name,
            Severity::High,
            format!("Every value of '{}' is distinct", name),
        ));
    }

    tests
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{DataTable, SourceInfo};
    use crate::profile::{Dataset, Profiler};
    use crate::validation::ValidationEngine;
    use std::path::PathBuf;

    fn simple() -> Dataset {
        let rows = vec![
            vec!["1", "Alice", "25", "85.5"],
            vec!["2", "Bob", "30", "92.0"],
            vec!["3", "Charlie", "", "78.5"],
            vec!["4", "David", "22", "95.0"],
            vec!["5", "Eve", "45", "88.5"],
        ];
        let table = DataTable::new(
            vec!["id", "name", "age", "score"]
                .into_iter()
                .map(String::from)
                .collect(),
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
            b',',
        );
        let source = SourceInfo {
            path: PathBuf::from("simple.csv"),
            file_name: "simple.csv".to_string(),
            size_bytes: 1,
            separator: b',',
            separator_detected: true,
            separator_fallback: false,
            source_columns: 4,
            row_limit: 1000,
        };
        let metadata = Profiler::new().profile(&table, &source);
        Dataset { metadata, table }
    }

    fn generate(data: &Dataset) -> GeneratedTests {
        let thresholds = Thresholds::default();
        let validation = ValidationEngine::new().validate(data, &thresholds).unwrap();
        TestSpecGenerator::new()
            .generate(&data.metadata, &validation, &thresholds, TestFramework::Pytest)
            .unwrap()
    }

    fn find<'a>(tests: &'a [TestSpec], subtype: TestSubtype, column: &str) -> Option<&'a TestSpec> {
        tests
            .iter()
            .find(|t| t.subtype == subtype && t.column.as_deref() == Some(column))
    }

    #[test]
    fn test_schema_tests_first() {
        let generated = generate(&simple());
        assert_eq!(generated.tests[0].subtype, TestSubtype::ColumnCount);
        assert_eq!(generated.tests[0].parameters["expected"], 4);
        assert_eq!(generated.tests[1].subtype, TestSubtype::ColumnNames);
        assert_eq!(generated.test_count, generated.tests.len());
        assert_eq!(generated.framework, TestFramework::Pytest);
    }

    #[test]
    fn test_bounds_and_nulls() {
        let generated = generate(&simple());
        let tests = &generated.tests;

        let min = find(tests, TestSubtype::Minimum, "age").unwrap();
        assert_eq!(min.parameters["min_value"], 22);
        let max = find(tests, TestSubtype::Maximum, "score").unwrap();
        assert_eq!(max.parameters["max_value"], 95.0);

        assert!(find(tests, TestSubtype::NoNulls, "id").is_some());
        let limited = find(tests, TestSubtype::LimitedNulls, "age").unwrap();
        assert_eq!(limited.parameters["max_null_percentage"], 20.0);
        assert_eq!(limited.severity, Severity::Medium);
    }

    #[test]
    fn test_uniqueness_and_strings() {
        let generated = generate(&simple());
        let tests = &generated.tests;

        assert!(find(tests, TestSubtype::UniqueValues, "id").is_some());
        assert!(find(tests, TestSubtype::UniqueValues, "age").is_none());
        // every name is distinct, so it is not a category
        assert!(find(tests, TestSubtype::Categorical, "name").is_none());
        let lengths = find(tests, TestSubtype::StringLength, "name").unwrap();
        assert_eq!(lengths.parameters["min_length"], 3);
        assert_eq!(lengths.parameters["max_length"], 7);
    }

    #[test]
    fn test_counts_by_type() {
        let generated = generate(&simple());
        let total: usize = generated.tests_by_type.values().sum();
        assert_eq!(total, generated.test_count);
        assert!(generated.tests_by_type[&TestType::Relationship] >= 1);
    }
}
