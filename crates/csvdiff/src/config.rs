//! Analyzer thresholds and cleaning parameters.

use serde::{Deserialize, Serialize};

use crate::error::{CsvDiffError, Result};

/// Detection thresholds for the validator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Null percentage above which a column is reported (0..=100).
    pub null_threshold: f64,
    /// Distinct percentage above which a text column is reported (0..=100).
    pub cardinality_threshold: f64,
    /// Absolute z-score above which a value is an outlier (> 0).
    pub outlier_threshold: f64,
    /// Share of typed-looking values that flags a text column (0 < r <= 1).
    pub type_issue_ratio: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            null_threshold: 5.0,
            cardinality_threshold: 95.0,
            outlier_threshold: 3.0,
            type_issue_ratio: 0.8,
        }
    }
}

impl Thresholds {
    /// Reject out-of-range values before any detector runs.
    pub fn validate(&self) -> Result<()> {
        check_percent("null_threshold", self.null_threshold)?;
        check_percent("cardinality_threshold", self.cardinality_threshold)?;
        if !self.outlier_threshold.is_finite() || self.outlier_threshold <= 0.0 {
            return Err(CsvDiffError::InvalidThreshold {
                name: "outlier_threshold",
                value: self.outlier_threshold,
                reason: "must be a finite number greater than 0",
            });
        }
        if !(self.type_issue_ratio > 0.0 && self.type_issue_ratio <= 1.0) {
            return Err(CsvDiffError::InvalidThreshold {
                name: "type_issue_ratio",
                value: self.type_issue_ratio,
                reason: "must be in (0, 1]",
            });
        }
        Ok(())
    }
}

/// Parameters for turning issues into cleaning steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Null percentage up to which dropping rows is suggested instead of
    /// filling. Only columns above `Thresholds::null_threshold` are reported,
    /// so this must sit above it for `dropna` to be reachable.
    pub drop_rows_threshold: f64,
    /// Null percentage from which dropping the whole column is suggested.
    pub drop_column_threshold: f64,
    /// Lower winsorization quantile.
    pub winsorize_lower: f64,
    /// Upper winsorization quantile.
    pub winsorize_upper: f64,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            drop_rows_threshold: 10.0,
            drop_column_threshold: 50.0,
            winsorize_lower: 0.05,
            winsorize_upper: 0.95,
        }
    }
}

impl CleaningConfig {
    pub fn validate(&self) -> Result<()> {
        check_percent("drop_rows_threshold", self.drop_rows_threshold)?;
        check_percent("drop_column_threshold", self.drop_column_threshold)?;
        if self.drop_column_threshold < self.drop_rows_threshold {
            return Err(CsvDiffError::InvalidThreshold {
                name: "drop_column_threshold",
                value: self.drop_column_threshold,
                reason: "must not be below drop_rows_threshold",
            });
        }
        let quantiles_ok = (0.0..=1.0).contains(&self.winsorize_lower)
            && (0.0..=1.0).contains(&self.winsorize_upper)
            && self.winsorize_lower < self.winsorize_upper;
        if !quantiles_ok {
            return Err(CsvDiffError::InvalidThreshold {
                name: "winsorize_lower",
                value: self.winsorize_lower,
                reason: "quantiles must satisfy 0 <= lower < upper <= 1",
            });
        }
        Ok(())
    }
}

fn check_percent(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(CsvDiffError::InvalidThreshold {
            name,
            value,
            reason: "must be a percentage between 0 and 100",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Thresholds::default().validate().is_ok());
        assert!(CleaningConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_thresholds() {
        let negative = Thresholds {
            null_threshold: -1.0,
            ..Default::default()
        };
        assert_eq!(negative.validate().unwrap_err().kind(), ErrorKind::Config);

        let zero_z = Thresholds {
            outlier_threshold: 0.0,
            ..Default::default()
        };
        assert!(zero_z.validate().is_err());

        let nan_z = Thresholds {
            outlier_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(nan_z.validate().is_err());

        let ratio = Thresholds {
            type_issue_ratio: 0.0,
            ..Default::default()
        };
        assert!(ratio.validate().is_err());
    }

    #[test]
    fn test_default_drop_rows_band_is_reachable() {
        let thresholds = Thresholds::default();
        let cleaning = CleaningConfig::default();
        assert!(cleaning.drop_rows_threshold > thresholds.null_threshold);
        assert!(cleaning.drop_column_threshold > cleaning.drop_rows_threshold);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let t: Thresholds = serde_json::from_str(r#"{"outlier_threshold": 1.5}"#).unwrap();
        assert_eq!(t.outlier_threshold, 1.5);
        assert_eq!(t.null_threshold, 5.0);
    }

    #[test]
    fn test_rejects_inverted_quantiles() {
        let config = CleaningConfig {
            winsorize_lower: 0.9,
            winsorize_upper: 0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
