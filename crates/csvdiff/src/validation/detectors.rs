//! Independent per-category issue detectors and the engine that runs them.

use indexmap::IndexMap;
use log::{debug, info};

use super::issue::{Issue, IssueCategory, VariantGroup};
use super::result::{ValidationResult, ValidationSummary};
use crate::config::Thresholds;
use crate::error::Result;
use crate::profile::Dataset;
use crate::profile::statistics::{percentage, round_to};
use crate::profile::type_inference::{looks_numeric, looks_temporal, parse_as};
use crate::schema::{ColumnProfile, ColumnType, FileInfo};

/// One issue category's detection pass.
///
/// Detectors read the dataset and thresholds only; they share no state, so
/// the order they run in never changes the result.
pub trait Detector: Send + Sync {
    fn category(&self) -> IssueCategory;

    fn detect(&self, dataset: &Dataset, thresholds: &Thresholds) -> Vec<Issue>;
}

/// Columns whose null percentage exceeds `null_threshold`.
pub struct MissingValuesDetector;

impl Detector for MissingValuesDetector {
    fn category(&self) -> IssueCategory {
        IssueCategory::MissingValues
    }

    fn detect(&self, dataset: &Dataset, thresholds: &Thresholds) -> Vec<Issue> {
        dataset
            .metadata
            .profiles()
            .filter(|p| p.null_count > 0)
            .filter_map(|p| {
                // The profile's percentage is rounded; compare the exact share.
                let exact = percentage(p.null_count, p.total_count());
                (exact > thresholds.null_threshold).then(|| {
                    let null_percentage = round_to(exact, 2);
                    Issue::MissingValues {
                        column: p.name.clone(),
                        null_count: p.null_count,
                        null_percentage,
                        description: format!(
                            "Column '{}' has {} missing values ({:.2}%)",
                            p.name, p.null_count, null_percentage
                        ),
                    }
                })
            })
            .collect()
    }
}

/// Non-numeric columns where almost every row holds a different value.
///
/// Boolean columns are skipped: with at most two values they only cross the
/// threshold in tables of one or two rows. Date columns stay in, since a
/// per-row timestamp behaves like an identifier.
pub struct HighCardinalityDetector;

impl Detector for HighCardinalityDetector {
    fn category(&self) -> IssueCategory {
        IssueCategory::HighCardinality
    }

    fn detect(&self, dataset: &Dataset, thresholds: &Thresholds) -> Vec<Issue> {
        dataset
            .metadata
            .profiles()
            .filter(|p| {
                !p.inferred_type.is_numeric()
                    && p.inferred_type != ColumnType::Boolean
                    && p.total_count() > 0
            })
            .filter_map(|p| {
                let unique_percentage = round_to(p.distinct_percentage(), 2);
                (p.distinct_percentage() > thresholds.cardinality_threshold).then(|| {
                    Issue::HighCardinality {
                        column: p.name.clone(),
                        unique_count: p.distinct_count,
                        unique_percentage,
                        description: format!(
                            "Column '{}' has {} distinct values ({:.2}% of rows); \
                             it may be an identifier rather than a category",
                            p.name, p.distinct_count, unique_percentage
                        ),
                    }
                })
            })
            .collect()
    }
}

/// Numeric values whose absolute z-score exceeds `outlier_threshold`.
///
/// Uses the column's population standard deviation. A column with zero
/// spread has no outliers.
pub struct OutlierDetector;

impl Detector for OutlierDetector {
    fn category(&self) -> IssueCategory {
        IssueCategory::Outliers
    }

    fn detect(&self, dataset: &Dataset, thresholds: &Thresholds) -> Vec<Issue> {
        let mut issues = Vec::new();

        for profile in dataset.metadata.profiles() {
            if !profile.inferred_type.is_numeric() {
                continue;
            }
            let (Some(mean), Some(std)) = (profile.mean, profile.std) else {
                continue;
            };
            if std == 0.0 {
                continue;
            }

            let flagged: Vec<f64> = dataset
                .non_null_values(&profile.name)
                .into_iter()
                .filter_map(|v| parse_as(profile.inferred_type, v).and_then(|p| p.as_f64()))
                .filter(|v| ((v - mean) / std).abs() > thresholds.outlier_threshold)
                .collect();

            if flagged.is_empty() {
                continue;
            }

            let min_value = flagged.iter().copied().fold(f64::INFINITY, f64::min);
            let max_value = flagged.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let outlier_percentage =
                round_to(percentage(flagged.len(), profile.total_count()), 2);

            debug!(
                "Column '{}': {} outliers beyond z={}",
                profile.name,
                flagged.len(),
                thresholds.outlier_threshold
            );

            issues.push(Issue::Outliers {
                column: profile.name.clone(),
                outlier_count: flagged.len(),
                outlier_percentage,
                min_value,
                max_value,
                z_threshold: thresholds.outlier_threshold,
                description: format!(
                    "Column '{}' has {} outliers (|z| > {}) ranging from {} to {}",
                    profile.name,
                    flagged.len(),
                    thresholds.outlier_threshold,
                    min_value,
                    max_value
                ),
            });
        }

        issues
    }
}

/// Text columns holding the same value under different casing or
/// whitespace.
pub struct InconsistentValuesDetector;

impl Detector for InconsistentValuesDetector {
    fn category(&self) -> IssueCategory {
        IssueCategory::InconsistentValues
    }

    fn detect(&self, dataset: &Dataset, _thresholds: &Thresholds) -> Vec<Issue> {
        let mut issues = Vec::new();

        for profile in dataset.metadata.profiles() {
            if profile.inferred_type != ColumnType::String {
                continue;
            }

            let values = dataset.non_null_values(&profile.name);
            // normalized -> raw spelling -> count, both in first-seen order
            let mut groups: IndexMap<String, IndexMap<&str, usize>> = IndexMap::new();
            for &value in &values {
                *groups
                    .entry(normalize_variant(value))
                    .or_default()
                    .entry(value)
                    .or_insert(0) += 1;
            }

            let mut variant_groups = Vec::new();
            let mut affected_count = 0;
            for (normalized, spellings) in groups.into_iter().filter(|(_, s)| s.len() > 1) {
                let (dominant, dominant_count) = spellings
                    .iter()
                    .fold(("", 0), |best, (s, c)| if *c > best.1 { (*s, *c) } else { best });
                affected_count += spellings.values().sum::<usize>() - dominant_count;
                variant_groups.push(VariantGroup {
                    normalized,
                    dominant: dominant.to_string(),
                    variants: spellings.keys().map(|s| s.to_string()).collect(),
                });
            }

            if variant_groups.is_empty() {
                continue;
            }

            let affected_percentage = round_to(percentage(affected_count, profile.total_count()), 2);
            issues.push(Issue::InconsistentValues {
                column: profile.name.clone(),
                description: format!(
                    "Column '{}' has {} value(s) written in several ways ({} rows affected)",
                    profile.name,
                    variant_groups.len(),
                    affected_count
                ),
                variant_groups,
                affected_count,
                affected_percentage,
            });
        }

        issues
    }
}

/// Normalization key for variant grouping: trimmed, lower-cased, inner
/// whitespace collapsed.
pub fn normalize_variant(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Text columns whose values mostly read as numbers or dates.
pub struct TypeIssueDetector;

impl Detector for TypeIssueDetector {
    fn category(&self) -> IssueCategory {
        IssueCategory::TypeIssues
    }

    fn detect(&self, dataset: &Dataset, thresholds: &Thresholds) -> Vec<Issue> {
        let mut issues = Vec::new();

        for profile in dataset.metadata.profiles() {
            if profile.inferred_type != ColumnType::String {
                continue;
            }
            let values = dataset.non_null_values(&profile.name);
            if values.is_empty() {
                continue;
            }

            let ratio_of = |pred: fn(&str) -> bool| {
                values.iter().filter(|v| pred(**v)).count() as f64 / values.len() as f64
            };

            let numeric_ratio = ratio_of(looks_numeric);
            let (suggested_type, parse_ratio) = if numeric_ratio >= thresholds.type_issue_ratio {
                (suggest_numeric_type(&values), numeric_ratio)
            } else {
                let temporal_ratio = ratio_of(looks_temporal);
                if temporal_ratio >= thresholds.type_issue_ratio {
                    (ColumnType::Date, temporal_ratio)
                } else {
                    continue;
                }
            };

            issues.push(type_issue(profile, suggested_type, parse_ratio));
        }

        issues
    }
}

fn suggest_numeric_type(values: &[&str]) -> ColumnType {
    let all_whole = values.iter().filter(|v| looks_numeric(v)).all(|v| {
        let digits: String = v
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
            .collect();
        digits.parse::<i64>().is_ok()
    });
    if all_whole {
        ColumnType::Integer
    } else {
        ColumnType::Float
    }
}

fn type_issue(profile: &ColumnProfile, suggested: ColumnType, ratio: f64) -> Issue {
    Issue::TypeIssues {
        column: profile.name.clone(),
        current_type: profile.inferred_type.to_string(),
        suggested_type: suggested.to_string(),
        parse_ratio: round_to(ratio, 4),
        description: format!(
            "Column '{}' is stored as text but {:.0}% of its values look like {}",
            profile.name,
            ratio * 100.0,
            suggested
        ),
    }
}

/// Runs every detector and assembles a [`ValidationResult`].
pub struct ValidationEngine {
    detectors: Vec<Box<dyn Detector>>,
}

impl ValidationEngine {
    /// Create an engine with all five detectors.
    pub fn new() -> Self {
        Self {
            detectors: vec![
                Box::new(MissingValuesDetector),
                Box::new(HighCardinalityDetector),
                Box::new(OutlierDetector),
                Box::new(InconsistentValuesDetector),
                Box::new(TypeIssueDetector),
            ],
        }
    }

    /// Validate thresholds, then run every detector.
    pub fn validate(&self, dataset: &Dataset, thresholds: &Thresholds) -> Result<ValidationResult> {
        thresholds.validate()?;

        let mut issues: IndexMap<IssueCategory, Vec<Issue>> = IssueCategory::ALL
            .iter()
            .map(|c| (*c, Vec::new()))
            .collect();

        for detector in &self.detectors {
            let found = detector.detect(dataset, thresholds);
            issues.entry(detector.category()).or_default().extend(found);
        }

        let summary = ValidationSummary::from_issues(&issues, &dataset.metadata.column_names);
        info!(
            "Validated {}: {} issues in {} columns",
            dataset.metadata.file_name,
            summary.total_issues,
            summary.columns_with_issues.len()
        );

        Ok(ValidationResult {
            file_info: FileInfo::from(&dataset.metadata),
            issues,
            summary,
        })
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}
