//! Data-quality validation: independent detectors over a profiled dataset.

mod detectors;
mod issue;
mod result;

pub use detectors::{
    Detector, HighCardinalityDetector, InconsistentValuesDetector, MissingValuesDetector,
    OutlierDetector, TypeIssueDetector, ValidationEngine, normalize_variant,
};
pub use issue::{Issue, IssueCategory, Severity, VariantGroup};
pub use result::{ValidationResult, ValidationSummary};
