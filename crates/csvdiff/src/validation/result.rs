//! Validation result and its summary.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::issue::{Issue, IssueCategory, Severity};
use crate::schema::FileInfo;

/// Aggregate counts over every issue found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total_issues: usize,
    pub issues_by_category: IndexMap<IssueCategory, usize>,
    pub issues_by_severity: IndexMap<Severity, usize>,
    /// Columns with at least one issue, in file order.
    pub columns_with_issues: Vec<String>,
}

impl ValidationSummary {
    pub(crate) fn from_issues(
        issues: &IndexMap<IssueCategory, Vec<Issue>>,
        column_order: &[String],
    ) -> Self {
        let mut issues_by_severity: IndexMap<Severity, usize> =
            Severity::ALL.iter().map(|s| (*s, 0)).collect();
        let mut affected: IndexSet<&str> = IndexSet::new();

        for issue in issues.values().flatten() {
            *issues_by_severity.entry(issue.severity()).or_insert(0) += 1;
            affected.insert(issue.column());
        }

        Self {
            total_issues: issues.values().map(Vec::len).sum(),
            issues_by_category: issues.iter().map(|(c, v)| (*c, v.len())).collect(),
            issues_by_severity,
            columns_with_issues: column_order
                .iter()
                .filter(|c| affected.contains(c.as_str()))
                .cloned()
                .collect(),
        }
    }
}

/// Everything `validate` found in one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub file_info: FileInfo,
    /// All five categories, always present, in fixed order.
    pub issues: IndexMap<IssueCategory, Vec<Issue>>,
    pub summary: ValidationSummary,
}

impl ValidationResult {
    /// Issues of one category.
    pub fn issues_of(&self, category: IssueCategory) -> &[Issue] {
        self.issues.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every issue, category by category.
    pub fn all_issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues.values().flatten()
    }

    pub fn has_issues(&self) -> bool {
        self.summary.total_issues > 0
    }
}
