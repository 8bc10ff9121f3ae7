//! Core type definitions for column profiles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inferred data type for a column.
///
/// Variants are listed in inference priority order: a column takes the first
/// type every non-null value parses as, and falls back to `String`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers (no decimal point).
    Integer,
    /// Floating-point numbers.
    Float,
    /// Boolean values (true/false, yes/no).
    Boolean,
    /// Date only (no time component).
    Date,
    /// Date and time values.
    DateTime,
    /// Text/string values.
    String,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::Date | ColumnType::DateTime)
    }

    /// Family used when comparing the same column across two files.
    pub fn family(&self) -> TypeFamily {
        match self {
            ColumnType::Integer | ColumnType::Float => TypeFamily::Numeric,
            ColumnType::Boolean => TypeFamily::Boolean,
            ColumnType::Date | ColumnType::DateTime => TypeFamily::Temporal,
            ColumnType::String => TypeFamily::Text,
        }
    }

    /// Lower-case name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::DateTime => "datetime",
            ColumnType::String => "string",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse grouping of column types whose values can be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFamily {
    Numeric,
    Boolean,
    Temporal,
    Text,
}

/// Minimum or maximum of a numeric or temporal column.
///
/// Integers stay integers and floats stay floats in JSON. Temporal bounds
/// are ISO 8601 strings, since JSON has no native date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bound {
    Integer(i64),
    Float(f64),
    Temporal(String),
}

impl Bound {
    /// Numeric value of the bound, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Bound::Integer(v) => Some(*v as f64),
            Bound::Float(v) => Some(*v),
            Bound::Temporal(_) => None,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Integer(v) => write!(f, "{}", v),
            Bound::Float(v) => write!(f, "{}", v),
            Bound::Temporal(v) => f.write_str(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_json_preserves_number_kind() {
        assert_eq!(serde_json::to_string(&Bound::Integer(22)).unwrap(), "22");
        assert_eq!(serde_json::to_string(&Bound::Float(2.5)).unwrap(), "2.5");

        let back: Bound = serde_json::from_str("22").unwrap();
        assert_eq!(back, Bound::Integer(22));
        let back: Bound = serde_json::from_str("2.5").unwrap();
        assert_eq!(back, Bound::Float(2.5));
        let back: Bound = serde_json::from_str("\"2024-01-15\"").unwrap();
        assert_eq!(back, Bound::Temporal("2024-01-15".to_string()));
    }

    #[test]
    fn test_type_families() {
        assert_eq!(ColumnType::Integer.family(), ColumnType::Float.family());
        assert_ne!(ColumnType::String.family(), ColumnType::Date.family());
        assert!(ColumnType::DateTime.is_temporal());
    }
}
