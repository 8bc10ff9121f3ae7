//! Ordered per-column type inference.
//!
//! A column is typed uniformly: each parser in [`PARSERS`] is tried against
//! every non-null value, and the first parser that accepts all of them
//! decides the type. If none does, the column is text.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::ColumnType;

// Loose shape checks used when judging whether text "looks" typed.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^\d{4}-\d{1,2}-\d{1,2}", // ISO date
        r"^\d{1,2}/\d{1,2}/\d{4}", // US date
        r"^\d{1,2}-\d{1,2}-\d{4}", // European date
        r"^\d{4}/\d{1,2}/\d{1,2}", // Alt ISO
        r"^\d{1,2}\.\d{1,2}\.\d{4}",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

static NUMERIC_LIKE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^[+-]?[$€£¥]?\s*[+-]?(\d{1,3}(,\d{3})+|\d+)?(\.\d+)?\s*%?$").ok()
});

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// A cell value after successful typed parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(String),
}

impl ParsedValue {
    /// Numeric view of the value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParsedValue::Integer(v) => Some(*v as f64),
            ParsedValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Instant view of a temporal value (dates at midnight).
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            ParsedValue::Date(d) => d.and_hms_opt(0, 0, 0),
            ParsedValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Key under which equal values collapse when counting distinct values.
    pub fn canonical_key(&self) -> String {
        match self {
            ParsedValue::Integer(v) => v.to_string(),
            ParsedValue::Float(v) if *v == 0.0 => "0".to_string(),
            ParsedValue::Float(v) => v.to_string(),
            ParsedValue::Boolean(v) => v.to_string(),
            ParsedValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            ParsedValue::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            ParsedValue::Text(s) => s.clone(),
        }
    }
}

/// A parser for one column type. `None` means the value is not of that type.
pub type ValueParser = fn(&str) -> Option<ParsedValue>;

/// Parsers in priority order. Text is the implicit last resort.
pub const PARSERS: [(ColumnType, ValueParser); 5] = [
    (ColumnType::Integer, parse_integer),
    (ColumnType::Float, parse_float),
    (ColumnType::Boolean, parse_boolean),
    (ColumnType::Date, parse_date),
    (ColumnType::DateTime, parse_datetime),
];

/// Infer the type of a column from its non-null values and return the
/// values parsed under that type.
///
/// A column with no values at all is typed as text.
pub fn infer_column(non_null: &[&str]) -> (ColumnType, Vec<ParsedValue>) {
    if non_null.is_empty() {
        return (ColumnType::String, Vec::new());
    }

    for (column_type, parser) in PARSERS {
        let parsed: Option<Vec<ParsedValue>> = non_null.iter().map(|v| parser(v)).collect();
        if let Some(parsed) = parsed {
            debug!("Column typed as {} ({} values)", column_type, parsed.len());
            return (column_type, parsed);
        }
    }

    let text = non_null
        .iter()
        .map(|v| ParsedValue::Text((*v).to_string()))
        .collect();
    (ColumnType::String, text)
}

/// Parse a value as the given column type.
pub fn parse_as(column_type: ColumnType, value: &str) -> Option<ParsedValue> {
    match column_type {
        ColumnType::Integer => parse_integer(value),
        ColumnType::Float => parse_float(value),
        ColumnType::Boolean => parse_boolean(value),
        ColumnType::Date => parse_date(value),
        ColumnType::DateTime => parse_datetime(value),
        ColumnType::String => Some(ParsedValue::Text(value.to_string())),
    }
}

pub fn parse_integer(value: &str) -> Option<ParsedValue> {
    value.trim().parse::<i64>().ok().map(ParsedValue::Integer)
}

pub fn parse_float(value: &str) -> Option<ParsedValue> {
    let trimmed = value.trim();
    // Rejects "inf", "NaN" and friends, which f64::from_str accepts.
    if trimmed.is_empty()
        || !trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(ParsedValue::Float)
}

pub fn parse_boolean(value: &str) -> Option<ParsedValue> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" => Some(ParsedValue::Boolean(true)),
        "false" | "no" => Some(ParsedValue::Boolean(false)),
        _ => None,
    }
}

pub fn parse_date(value: &str) -> Option<ParsedValue> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .map(ParsedValue::Date)
}

/// Accepts timestamps, and plain dates as midnight so that a column mixing
/// both is still temporal.
pub fn parse_datetime(value: &str) -> Option<ParsedValue> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ParsedValue::DateTime(dt.naive_utc()));
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| match parse_date(trimmed) {
            Some(ParsedValue::Date(d)) => d.and_hms_opt(0, 0, 0),
            _ => None,
        })
        .map(ParsedValue::DateTime)
}

/// Whether text reads as a number once currency symbols, thousands
/// separators and a trailing percent sign are ignored.
pub fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    if parse_float(trimmed).is_some() {
        return true;
    }
    NUMERIC_LIKE
        .as_ref()
        .map(|re| re.is_match(trimmed))
        .unwrap_or(false)
}

/// Whether text has the shape of a date or timestamp.
pub fn looks_temporal(value: &str) -> bool {
    let trimmed = value.trim();
    parse_datetime(trimmed).is_some() || DATE_PATTERNS.iter().any(|p| p.is_match(trimmed))
}
