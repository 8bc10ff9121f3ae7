//! Schema restructuring recommendation types.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CsvDiffError;
use crate::schema::{ColumnType, FileInfo};
use crate::validation::Severity;

/// Target rendering for restructure output. Only the name is resolved
/// here; rendering belongs to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestructureFormat {
    Sql,
    Mermaid,
    Python,
}

impl RestructureFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestructureFormat::Sql => "sql",
            RestructureFormat::Mermaid => "mermaid",
            RestructureFormat::Python => "python",
        }
    }
}

impl FromStr for RestructureFormat {
    type Err = CsvDiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sql" => Ok(RestructureFormat::Sql),
            "mermaid" => Ok(RestructureFormat::Mermaid),
            "python" => Ok(RestructureFormat::Python),
            _ => Err(CsvDiffError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for RestructureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column definition for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub logical_type: ColumnType,
    pub nullable: bool,
    pub unique: bool,
    /// Longest observed value, for text columns.
    pub max_length: Option<usize>,
    pub primary_key: bool,
}

/// A single normalization opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Recommendation {
    /// Use `column` as the table key, or add a surrogate key named
    /// `column` when `surrogate` is set.
    PrimaryKey {
        column: String,
        surrogate: bool,
        severity: Severity,
        description: String,
    },
    /// Move repeating low-cardinality columns into their own table keyed by
    /// `key_column`.
    LookupTable {
        table_name: String,
        key_column: String,
        columns: Vec<String>,
        distinct_count: usize,
        severity: Severity,
        description: String,
    },
    /// `column` only holds values found in `references_column`.
    ForeignKey {
        column: String,
        references_column: String,
        severity: Severity,
        description: String,
    },
    /// Text column that should be stored with a stronger type.
    TypeConversion {
        column: String,
        current_type: String,
        suggested_type: String,
        severity: Severity,
        description: String,
    },
}

impl Recommendation {
    pub fn kind(&self) -> &'static str {
        match self {
            Recommendation::PrimaryKey { .. } => "primary_key",
            Recommendation::LookupTable { .. } => "lookup_table",
            Recommendation::ForeignKey { .. } => "foreign_key",
            Recommendation::TypeConversion { .. } => "type_conversion",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Recommendation::PrimaryKey { severity, .. }
            | Recommendation::LookupTable { severity, .. }
            | Recommendation::ForeignKey { severity, .. }
            | Recommendation::TypeConversion { severity, .. } => *severity,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Recommendation::PrimaryKey { description, .. }
            | Recommendation::LookupTable { description, .. }
            | Recommendation::ForeignKey { description, .. }
            | Recommendation::TypeConversion { description, .. } => description,
        }
    }
}

/// Restructuring advice for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestructureResult {
    pub file_info: FileInfo,
    pub format: RestructureFormat,
    pub table_name: String,
    pub columns: Vec<ColumnDefinition>,
    pub recommendations: Vec<Recommendation>,
    pub recommendations_by_type: IndexMap<String, usize>,
    pub recommendations_by_severity: IndexMap<Severity, usize>,
}
