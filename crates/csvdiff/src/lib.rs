//! csvdiff: profiling, comparison and data-quality analysis for delimited
//! tabular files.
//!
//! A bounded slice of a CSV/TSV file is loaded and profiled once into
//! [`DatasetMetadata`]. Heuristic analyzers then work from that profile:
//!
//! - **Compare**: structural and positional value differences between two files
//! - **Validate**: missing values, high cardinality, outliers, inconsistent
//!   spellings and mistyped columns
//! - **Clean**: ordered remediation steps with their estimated impact
//! - **Restructure**: keys, lookup tables, foreign keys and type conversions
//! - **Generate tests**: framework-agnostic data assertions
//!
//! Every result is a plain serde value. Rendering to SQL, diagrams or test
//! code, and asking a language model about a result, happen outside the
//! engine; [`llm`] only builds the prompts.
//!
//! # Example
//!
//! ```no_run
//! use csvdiff::CsvDiff;
//!
//! let csvdiff = CsvDiff::new();
//! let result = csvdiff.validate("data.csv").unwrap();
//!
//! println!("Issues: {}", result.summary.total_issues);
//! for issue in result.all_issues() {
//!     println!("{}: {}", issue.column(), issue.description());
//! }
//! ```

pub mod cleaning;
pub mod compare;
pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod profile;
pub mod restructure;
pub mod schema;
pub mod testgen;
pub mod validation;

mod csvdiff;

pub use crate::csvdiff::{CsvDiff, CsvDiffConfig};
pub use cleaning::{CleaningAction, CleaningPlan, CleaningStep};
pub use compare::ComparisonResult;
pub use config::{CleaningConfig, Thresholds};
pub use error::{CsvDiffError, ErrorKind, Result};
pub use input::{DataTable, ParserConfig, SourceInfo};
pub use profile::{Dataset, ProfilerConfig};
pub use restructure::{Recommendation, RestructureFormat, RestructureResult};
pub use schema::{ColumnProfile, ColumnType, DatasetMetadata};
pub use testgen::{GeneratedTests, TestFramework, TestSpec};
pub use validation::{Issue, IssueCategory, Severity, ValidationResult};
