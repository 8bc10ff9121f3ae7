//! Framework-agnostic test assertion types.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CsvDiffError;
use crate::schema::FileInfo;
use crate::validation::Severity;

/// Broad kind of a generated test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    Schema,
    Value,
    Quality,
    Relationship,
}

/// Specific assertion a test makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestSubtype {
    ColumnCount,
    ColumnNames,
    ColumnType,
    Minimum,
    Maximum,
    Categorical,
    StringLength,
    NoNulls,
    LimitedNulls,
    Duplicates,
    Outliers,
    UniqueValues,
}

impl TestSubtype {
    pub fn test_type(&self) -> TestType {
        match self {
            TestSubtype::ColumnCount | TestSubtype::ColumnNames | TestSubtype::ColumnType => {
                TestType::Schema
            }
            TestSubtype::Minimum
            | TestSubtype::Maximum
            | TestSubtype::Categorical
            | TestSubtype::StringLength => TestType::Value,
            TestSubtype::NoNulls
            | TestSubtype::LimitedNulls
            | TestSubtype::Duplicates
            | TestSubtype::Outliers => TestType::Quality,
            TestSubtype::UniqueValues => TestType::Relationship,
        }
    }
}

/// One assertion about the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSpec {
    #[serde(rename = "type")]
    pub test_type: TestType,
    pub subtype: TestSubtype,
    /// Target column; absent for table-level tests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub parameters: Value,
    pub severity: Severity,
    pub description: String,
}

impl TestSpec {
    pub fn table(subtype: TestSubtype, severity: Severity, description: impl Into<String>) -> Self {
        Self {
            test_type: subtype.test_type(),
            subtype,
            column: None,
            parameters: Value::Null,
            severity,
            description: description.into(),
        }
    }

    pub fn column(
        subtype: TestSubtype,
        column: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            column: Some(column.into()),
            ..Self::table(subtype, severity, description)
        }
    }

    pub fn with_parameters(mut self, params: Value) -> Self {
        self.parameters = params;
        self
    }
}

/// Test framework the specs will be rendered for. Only the name is
/// resolved here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestFramework {
    Pytest,
    GreatExpectations,
    Dbt,
}

impl TestFramework {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestFramework::Pytest => "pytest",
            TestFramework::GreatExpectations => "great_expectations",
            TestFramework::Dbt => "dbt",
        }
    }
}

impl FromStr for TestFramework {
    type Err = CsvDiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pytest" => Ok(TestFramework::Pytest),
            "great_expectations" => Ok(TestFramework::GreatExpectations),
            "dbt" => Ok(TestFramework::Dbt),
            _ => Err(CsvDiffError::UnsupportedFramework(s.to_string())),
        }
    }
}

impl fmt::Display for TestFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generated specs for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTests {
    pub file_info: FileInfo,
    pub framework: TestFramework,
    pub test_count: usize,
    pub tests_by_type: IndexMap<TestType, usize>,
    pub tests_by_severity: IndexMap<Severity, usize>,
    pub tests: Vec<TestSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_framework_names() {
        assert_eq!("pytest".parse::<TestFramework>().unwrap(), TestFramework::Pytest);
        assert_eq!(
            "great_expectations".parse::<TestFramework>().unwrap(),
            TestFramework::GreatExpectations
        );
        let err = "invalid".parse::<TestFramework>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("Framework 'invalid' not supported"));
    }

    #[test]
    fn test_table_level_spec_omits_column() {
        let spec = TestSpec::table(TestSubtype::ColumnCount, Severity::High, "4 columns")
            .with_parameters(serde_json::json!({ "expected": 4 }));
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["type"], "schema");
        assert_eq!(json["subtype"], "column_count");
        assert!(json.get("column").is_none());
    }
}
