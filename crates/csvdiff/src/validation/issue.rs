//! Data-quality issue types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How urgent an issue is. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five issue categories, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    MissingValues,
    HighCardinality,
    Outliers,
    InconsistentValues,
    TypeIssues,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 5] = [
        IssueCategory::MissingValues,
        IssueCategory::HighCardinality,
        IssueCategory::Outliers,
        IssueCategory::InconsistentValues,
        IssueCategory::TypeIssues,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::MissingValues => "missing_values",
            IssueCategory::HighCardinality => "high_cardinality",
            IssueCategory::Outliers => "outliers",
            IssueCategory::InconsistentValues => "inconsistent_values",
            IssueCategory::TypeIssues => "type_issues",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spellings of one value that differ only in case or whitespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantGroup {
    /// Normalized form shared by every variant.
    pub normalized: String,
    /// Distinct raw spellings, first-seen order.
    pub variants: Vec<String>,
    /// Most frequent spelling (first seen on ties).
    pub dominant: String,
}

/// A single data-quality finding for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Issue {
    MissingValues {
        column: String,
        null_count: usize,
        null_percentage: f64,
        description: String,
    },
    HighCardinality {
        column: String,
        unique_count: usize,
        unique_percentage: f64,
        description: String,
    },
    Outliers {
        column: String,
        outlier_count: usize,
        outlier_percentage: f64,
        min_value: f64,
        max_value: f64,
        z_threshold: f64,
        description: String,
    },
    InconsistentValues {
        column: String,
        variant_groups: Vec<VariantGroup>,
        affected_count: usize,
        affected_percentage: f64,
        description: String,
    },
    TypeIssues {
        column: String,
        current_type: String,
        suggested_type: String,
        parse_ratio: f64,
        description: String,
    },
}

impl Issue {
    pub fn column(&self) -> &str {
        match self {
            Issue::MissingValues { column, .. }
            | Issue::HighCardinality { column, .. }
            | Issue::Outliers { column, .. }
            | Issue::InconsistentValues { column, .. }
            | Issue::TypeIssues { column, .. } => column,
        }
    }

    pub fn category(&self) -> IssueCategory {
        match self {
            Issue::MissingValues { .. } => IssueCategory::MissingValues,
            Issue::HighCardinality { .. } => IssueCategory::HighCardinality,
            Issue::Outliers { .. } => IssueCategory::Outliers,
            Issue::InconsistentValues { .. } => IssueCategory::InconsistentValues,
            Issue::TypeIssues { .. } => IssueCategory::TypeIssues,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Issue::MissingValues { description, .. }
            | Issue::HighCardinality { description, .. }
            | Issue::Outliers { description, .. }
            | Issue::InconsistentValues { description, .. }
            | Issue::TypeIssues { description, .. } => description,
        }
    }

    /// Severity derived from the issue's magnitude.
    pub fn severity(&self) -> Severity {
        match self {
            Issue::MissingValues {
                null_percentage, ..
            } => {
                if *null_percentage >= 50.0 {
                    Severity::High
                } else if *null_percentage >= 20.0 {
                    Severity::Medium
                } else {
                    Severity::Low
                }
            }
            Issue::HighCardinality {
                unique_percentage, ..
            } => {
                if *unique_percentage >= 100.0 {
                    Severity::Medium
                } else {
                    Severity::Low
                }
            }
            Issue::Outliers {
                outlier_percentage, ..
            } => {
                if *outlier_percentage >= 10.0 {
                    Severity::High
                } else if *outlier_percentage >= 2.0 {
                    Severity::Medium
                } else {
                    Severity::Low
                }
            }
            Issue::InconsistentValues {
                affected_percentage,
                ..
            } => {
                if *affected_percentage >= 20.0 {
                    Severity::High
                } else if *affected_percentage >= 5.0 {
                    Severity::Medium
                } else {
                    Severity::Low
                }
            }
            Issue::TypeIssues { .. } => Severity::Medium,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn test_issue_serializes_with_type_tag() {
        let issue = Issue::MissingValues {
            column: "age".to_string(),
            null_count: 1,
            null_percentage: 20.0,
            description: "1 missing".to_string(),
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["type"], "missing_values");
        assert_eq!(json["null_percentage"], 20.0);
        assert_eq!(issue.severity(), Severity::Medium);
        assert_eq!(issue.category(), IssueCategory::MissingValues);
    }
}
