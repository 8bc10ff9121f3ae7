//! Property-based tests for the csvdiff analyzers.
//!
//! Tables are generated in memory and profiled directly, except for the
//! row-cap law, which needs a real file to prove that reading stops early.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p csvdiff --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p csvdiff --test property_tests
//! ```

use std::io::Write;
use std::path::PathBuf;

use proptest::prelude::*;
use tempfile::NamedTempFile;

use csvdiff::compare::Comparator;
use csvdiff::input::{detect_in_sample, parse_separator};
use csvdiff::profile::Profiler;
use csvdiff::validation::{ValidationEngine, normalize_variant};
use csvdiff::{CsvDiff, CsvDiffConfig, DataTable, Dataset, SourceInfo, Thresholds};

// =============================================================================
// Test Strategies
// =============================================================================

/// Cell text: numbers, words, null tokens and blanks.
fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        "-?[0-9]{1,4}",
        "-?[0-9]{1,3}\\.[0-9]{1,2}",
        "[a-zA-Z ]{1,8}",
        Just(String::new()),
        Just("NA".to_string()),
        Just("true".to_string()),
        "20[0-2][0-9]-0[1-9]-1[0-9]",
    ]
}

/// A table with 1 to 4 columns and up to 30 rows.
fn table() -> impl Strategy<Value = DataTable> {
    (1usize..=4).prop_flat_map(|cols| {
        prop::collection::vec(prop::collection::vec(cell(), cols), 0..30).prop_map(
            move |rows| {
                let headers = (0..cols).map(|i| format!("col{}", i)).collect();
                DataTable::new(headers, rows, b',')
            },
        )
    })
}

fn dataset(table: DataTable) -> Dataset {
    let source = SourceInfo {
        path: PathBuf::from("generated.csv"),
        file_name: "generated.csv".to_string(),
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

fn thresholds() -> impl Strategy<Value = Thresholds> {
    (0.0f64..=100.0, 0.0f64..=100.0, 0.5f64..5.0).prop_map(|(null, card, z)| Thresholds {
        null_threshold: null,
        cardinality_threshold: card,
        outlier_threshold: z,
        ..Thresholds::default()
    })
}

// =============================================================================
// Profiling
// =============================================================================

proptest! {
    /// Every cell is either null or non-null, and distinct values never
    /// outnumber rows.
    #[test]
    fn null_counts_partition_rows(table in table()) {
        let data = dataset(table);
        let metadata = &data.metadata;
        for profile in metadata.profiles() {
            prop_assert_eq!(profile.null_count + profile.non_null_count, metadata.total_rows);
            prop_assert!(profile.distinct_count <= metadata.total_rows);
            prop_assert!(profile.null_percentage >= 0.0 && profile.null_percentage <= 100.0);
        }
    }

    /// Loading never reads past the row cap, and reads everything under it.
    #[test]
    fn row_cap_law(rows in 0usize..40, max_rows in 1usize..50) {
        let mut content = String::from("idx,label\n");
        for i in 0..rows {
            content.push_str(&format!("{},row{}\n", i, i));
        }
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();

        let mut config = CsvDiffConfig::default();
        config.parser.max_rows = max_rows;
        let metadata = CsvDiff::with_config(config).summarize(file.path()).unwrap();

        prop_assert_eq!(metadata.total_rows, rows.min(max_rows));
    }
}

// =============================================================================
// Compare and validate
// =============================================================================

proptest! {
    /// A dataset compared with itself has no value or type changes.
    #[test]
    fn compare_is_reflexive(table in table()) {
        let data = dataset(table);
        let result = Comparator::new().compare(&data, &data);

        prop_assert!(result.value_changes.is_empty());
        prop_assert!(result.type_changes.is_empty());
        prop_assert!(result.is_identical());
    }

    /// Diff percentages agree with diff counts.
    #[test]
    fn diff_percentage_matches_count(first in table(), second in table()) {
        let (a, b) = (dataset(first), dataset(second));
        let result = Comparator::new().compare(&a, &b);

        for change in result.value_changes.values() {
            prop_assert!(change.diff_count > 0);
            prop_assert!(change.diff_count <= result.compared_rows);
            let exact = 100.0 * change.diff_count as f64 / result.compared_rows as f64;
            // one decimal place
            prop_assert!((change.diff_percentage - exact).abs() <= 0.05 + 1e-9);
            prop_assert!((change.diff_percentage * 10.0 - (change.diff_percentage * 10.0).round()).abs() < 1e-6);
        }
    }

    /// Validation carries no state between calls.
    #[test]
    fn validate_is_idempotent(table in table(), thresholds in thresholds()) {
        let data = dataset(table);
        let engine = ValidationEngine::new();
        let first = engine.validate(&data, &thresholds).unwrap();
        let second = engine.validate(&data, &thresholds).unwrap();

        prop_assert_eq!(&first.issues, &second.issues);
        prop_assert_eq!(first.summary.total_issues, first.all_issues().count());
    }
}

// =============================================================================
// Detection helpers
// =============================================================================

proptest! {
    /// Detection always answers with a known candidate.
    #[test]
    fn detection_never_panics(sample in "[a-z0-9,;|\\t\"\\n]{0,200}", truncated in any::<bool>()) {
        let detection = detect_in_sample(&sample, truncated);
        prop_assert!(b",;\t|".contains(&detection.separator));
        if detection.fallback {
            prop_assert_eq!(detection.separator, b',');
        }
    }

    /// Separator overrides accept exactly one character.
    #[test]
    fn single_char_separators_parse(c in "[,;|:#]") {
        prop_assert_eq!(parse_separator(&c).unwrap(), c.as_bytes()[0]);
    }

    /// Normalizing a variant twice changes nothing.
    #[test]
    fn normalize_variant_is_idempotent(value in "[a-zA-Z \\t]{0,20}") {
        let once = normalize_variant(&value);
        prop_assert_eq!(normalize_variant(&once), once.clone());
    }
}
