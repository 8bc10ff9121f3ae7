//! Main CsvDiff struct and public API.

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::cleaning::{CleaningAdvisor, CleaningPlan};
use crate::compare::{Comparator, ComparisonResult};
use crate::config::{CleaningConfig, Thresholds};
use crate::error::Result;
use crate::input::ParserConfig;
use crate::profile::{Dataset, Preprocessor, ProfilerConfig};
use crate::restructure::{RestructureFormat, RestructureResult, SchemaAdvisor};
use crate::schema::DatasetMetadata;
use crate::testgen::{GeneratedTests, TestFramework, TestSpecGenerator};
use crate::validation::{ValidationEngine, ValidationResult};

/// Configuration for every CsvDiff operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvDiffConfig {
    /// Loading caps and separator override.
    pub parser: ParserConfig,
    /// Profiling settings.
    pub profiler: ProfilerConfig,
    /// Detector thresholds.
    pub thresholds: Thresholds,
    /// Cleaning step cutoffs.
    pub cleaning: CleaningConfig,
}

/// The main CsvDiff analysis engine.
///
/// Every operation loads its input afresh, so one instance can serve
/// independent calls from several threads.
pub struct CsvDiff {
    config: CsvDiffConfig,
    validation: ValidationEngine,
    cleaning: CleaningAdvisor,
}

impl CsvDiff {
    /// Create a CsvDiff instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(CsvDiffConfig::default())
    }

    /// Create a CsvDiff instance with custom configuration.
    pub fn with_config(config: CsvDiffConfig) -> Self {
        let cleaning = CleaningAdvisor::with_config(config.cleaning.clone());
        Self {
            config,
            validation: ValidationEngine::new(),
            cleaning,
        }
    }

    pub fn config(&self) -> &CsvDiffConfig {
        &self.config
    }

    /// Load and profile a file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Dataset> {
        self.preprocessor(self.config.parser.separator).analyze(path)
    }

    /// Profile a file and return its metadata.
    pub fn summarize(&self, path: impl AsRef<Path>) -> Result<DatasetMetadata> {
        Ok(self.load(path)?.metadata)
    }

    /// Compare two files positionally.
    pub fn compare(
        &self,
        path1: impl AsRef<Path>,
        path2: impl AsRef<Path>,
    ) -> Result<ComparisonResult> {
        self.compare_with_separators(path1, path2, None, None)
    }

    /// Compare two files, each with its own separator override. `None`
    /// falls back to the configured separator, then to detection.
    pub fn compare_with_separators(
        &self,
        path1: impl AsRef<Path>,
        path2: impl AsRef<Path>,
        separator1: Option<u8>,
        separator2: Option<u8>,
    ) -> Result<ComparisonResult> {
        let default = self.config.parser.separator;
        let first = self.preprocessor(separator1.or(default)).analyze(path1)?;
        let second = self.preprocessor(separator2.or(default)).analyze(path2)?;
        Ok(Comparator::new().compare(&first, &second))
    }

    /// Detect data-quality issues in a file.
    pub fn validate(&self, path: impl AsRef<Path>) -> Result<ValidationResult> {
        self.config.thresholds.validate()?;
        let dataset = self.load(path)?;
        self.validation.validate(&dataset, &self.config.thresholds)
    }

    /// Validate a file and derive a cleaning plan from its issues.
    pub fn clean(&self, path: impl AsRef<Path>) -> Result<CleaningPlan> {
        self.config.thresholds.validate()?;
        self.config.cleaning.validate()?;
        if self.config.cleaning.drop_rows_threshold <= self.config.thresholds.null_threshold {
            warn!(
                "drop_rows_threshold {} is not above null_threshold {}; dropna will never be suggested",
                self.config.cleaning.drop_rows_threshold, self.config.thresholds.null_threshold
            );
        }
        let dataset = self.load(path)?;
        let validation = self.validation.validate(&dataset, &self.config.thresholds)?;
        self.cleaning.plan(&validation, &dataset.metadata)
    }

    /// Recommend schema changes for a file. `format` names the renderer the
    /// result is meant for and is checked before the file is read.
    pub fn restructure(
        &self,
        path: impl AsRef<Path>,
        format: &str,
        table_name: Option<&str>,
    ) -> Result<RestructureResult> {
        let format: RestructureFormat = format.parse()?;
        let dataset = self.load(path)?;
        Ok(SchemaAdvisor::new().restructure(&dataset, format, table_name))
    }

    /// Generate framework-agnostic test specs for a file. `framework` is
    /// checked before the file is read.
    pub fn generate_tests(
        &self,
        path: impl AsRef<Path>,
        framework: &str,
    ) -> Result<GeneratedTests> {
        let framework: TestFramework = framework.parse()?;
        self.config.thresholds.validate()?;
        let dataset = self.load(path)?;
        let validation = self.validation.validate(&dataset, &self.config.thresholds)?;
        TestSpecGenerator::new().generate(
            &dataset.metadata,
            &validation,
            &self.config.thresholds,
            framework,
        )
    }

    fn preprocessor(&self, separator: Option<u8>) -> Preprocessor {
        let parser = ParserConfig {
            separator,
            ..self.config.parser.clone()
        };
        Preprocessor::with_config(parser, self.config.profiler.clone())
    }
}

impl Default for CsvDiff {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_unsupported_names_checked_before_io() {
        let csvdiff = CsvDiff::new();

        let err = csvdiff
            .generate_tests("does_not_exist.csv", "invalid")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("'invalid'"));

        let err = csvdiff
            .restructure("does_not_exist.csv", "invalid", None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_invalid_thresholds_rejected_before_io() {
        let mut config = CsvDiffConfig::default();
        config.thresholds.outlier_threshold = 0.0;
        let err = CsvDiff::with_config(config)
            .validate("does_not_exist.csv")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_compare_with_separators() {
        let comma = csv_file("a,b\n1,x\n2,y\n");
        let semi = csv_file("a;b\n1;x\n3;y\n");

        let result = CsvDiff::new()
            .compare_with_separators(comma.path(), semi.path(), Some(b','), Some(b';'))
            .unwrap();
        assert_eq!(result.structural_changes.common_columns, vec!["a", "b"]);
        assert_eq!(result.value_changes["a"].diff_count, 1);
        assert_eq!(result.value_changes["a"].diff_percentage, 50.0);
    }

    #[test]
    fn test_summarize_respects_row_cap() {
        let file = csv_file("n\n1\n2\n3\n4\n");
        let mut config = CsvDiffConfig::default();
        config.parser.max_rows = 2;
        let metadata = CsvDiff::with_config(config).summarize(file.path()).unwrap();
        assert_eq!(metadata.total_rows, 2);
    }
}
