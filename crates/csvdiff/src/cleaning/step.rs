//! Cleaning step types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::FileInfo;
use crate::validation::{IssueCategory, Severity};

/// Remediation to apply to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningAction {
    /// Drop rows where the column is null.
    Dropna,
    /// Fill nulls with a statistic of the column.
    Fillna,
    /// Drop the whole column.
    DropColumn,
    /// Clamp values to percentile bounds.
    Winsorize,
    /// Clamp values to z-score bounds.
    Cap,
    /// Convert text to a typed column.
    ConvertType,
    /// Map spelling variants to one canonical form.
    NormalizeValues,
    /// Stop treating the column as a category.
    TreatAsIdentifier,
    /// Fold infrequent categories into one bucket.
    GroupRareCategories,
}

impl CleaningAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CleaningAction::Dropna => "dropna",
            CleaningAction::Fillna => "fillna",
            CleaningAction::DropColumn => "drop_column",
            CleaningAction::Winsorize => "winsorize",
            CleaningAction::Cap => "cap",
            CleaningAction::ConvertType => "convert_type",
            CleaningAction::NormalizeValues => "normalize_values",
            CleaningAction::TreatAsIdentifier => "treat_as_identifier",
            CleaningAction::GroupRareCategories => "group_rare_categories",
        }
    }

    /// Whether applying the action removes rows.
    pub fn removes_rows(&self) -> bool {
        matches!(self, CleaningAction::Dropna)
    }
}

/// One recommended remediation, derived from a single issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningStep {
    pub issue_type: IssueCategory,
    pub column: String,
    pub action: CleaningAction,
    pub severity: Severity,
    pub rationale: String,
    /// Action-specific parameters.
    pub parameters: Value,
    /// Rows the step would touch.
    pub affected_rows: usize,
}

impl CleaningStep {
    pub fn new(
        issue_type: IssueCategory,
        column: impl Into<String>,
        action: CleaningAction,
        severity: Severity,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            issue_type,
            column: column.into(),
            action,
            severity,
            rationale: rationale.into(),
            parameters: Value::Null,
            affected_rows: 0,
        }
    }

    pub fn with_parameters(mut self, params: Value) -> Self {
        self.parameters = params;
        self
    }

    pub fn with_affected_rows(mut self, count: usize) -> Self {
        self.affected_rows = count;
        self
    }
}

/// Rough effect of applying every step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotentialImpact {
    /// Upper bound: null rows of every `dropna` column, capped at the row
    /// count.
    pub estimated_rows_removed: usize,
    /// Cells rewritten by fills, clamps, conversions and normalization.
    pub estimated_values_modified: usize,
    pub columns_dropped: Vec<String>,
    /// Columns touched by any step, in file order.
    pub columns_affected: Vec<String>,
    pub steps_by_severity: IndexMap<Severity, usize>,
}

/// Ordered cleaning steps for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningPlan {
    pub file_info: FileInfo,
    pub steps: Vec<CleaningStep>,
    pub potential_impact: PotentialImpact,
}
