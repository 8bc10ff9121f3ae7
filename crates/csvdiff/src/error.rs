//! Error types for the csvdiff library.

use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a failure, so callers can tell a bad input file
/// from a bad configuration without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input path is missing, unreadable or empty.
    File,
    /// The file exists but is not parseable delimited text.
    Format,
    /// A threshold, separator or name argument is invalid.
    Config,
    /// Converting a result to or from JSON failed.
    Serialization,
}

/// Main error type for csvdiff operations.
#[derive(Debug, Error)]
pub enum CsvDiffError {
    /// The input path does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The input path exists but is a directory or other non-file.
    #[error("Not a regular file: {}", path.display())]
    NotAFile { path: PathBuf },

    /// The input file has zero bytes.
    #[error("File is empty: {}", path.display())]
    EmptyFile { path: PathBuf },

    /// Error reading or accessing a file.
    #[error("IO error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not valid UTF-8.
    #[error("Invalid encoding in '{}' near row {row}: expected UTF-8", path.display())]
    Encoding { path: PathBuf, row: usize },

    /// A record could not be parsed as delimited text.
    #[error("Invalid CSV format at row {row}: {message}")]
    Parse { row: usize, message: String },

    /// No header row could be read.
    #[error("Invalid CSV format: no header row in '{}'", path.display())]
    MissingHeader { path: PathBuf },

    /// A threshold is outside its documented range.
    #[error("Invalid threshold {name} = {value}: {reason}")]
    InvalidThreshold {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A separator override is not a single supported character.
    #[error("Invalid separator: {0:?}")]
    InvalidSeparator(String),

    /// Unknown test framework name.
    #[error("Framework '{0}' not supported. Available frameworks: pytest, great_expectations, dbt")]
    UnsupportedFramework(String),

    /// Unknown restructure output format name.
    #[error("Format '{0}' not supported. Available formats: sql, mermaid, python")]
    UnsupportedFormat(String),

    /// Unknown LLM provider name.
    #[error("Provider '{0}' not supported. Available providers: openai, gemini")]
    UnsupportedProvider(String),

    /// Code explanation was asked for without code text or a file.
    #[error("No code provided: pass code text or a file path")]
    NoCode,

    /// Any other invalid configuration value.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CsvDiffError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CsvDiffError::FileNotFound { .. }
            | CsvDiffError::NotAFile { .. }
            | CsvDiffError::EmptyFile { .. }
            | CsvDiffError::Io { .. } => ErrorKind::File,
            CsvDiffError::Encoding { .. }
            | CsvDiffError::Parse { .. }
            | CsvDiffError::MissingHeader { .. } => ErrorKind::Format,
            CsvDiffError::InvalidThreshold { .. }
            | CsvDiffError::InvalidSeparator(_)
            | CsvDiffError::UnsupportedFramework(_)
            | CsvDiffError::UnsupportedFormat(_)
            | CsvDiffError::UnsupportedProvider(_)
            | CsvDiffError::NoCode
            | CsvDiffError::InvalidConfig(_) => ErrorKind::Config,
            CsvDiffError::Json(_) => ErrorKind::Serialization,
        }
    }
}

/// Result type alias for csvdiff operations.
pub type Result<T> = std::result::Result<T, CsvDiffError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_message() {
        let err = CsvDiffError::FileNotFound {
            path: PathBuf::from("nonexistent_file.csv"),
        };
        assert_eq!(err.kind(), ErrorKind::File);
        assert_eq!(err.to_string(), "File not found: nonexistent_file.csv");
    }

    #[test]
    fn test_unsupported_names_are_config_errors() {
        let err = CsvDiffError::UnsupportedFramework("invalid".to_string());
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().starts_with("Framework 'invalid' not supported"));

        let err = CsvDiffError::UnsupportedFormat("invalid".to_string());
        assert!(err.to_string().starts_with("Format 'invalid' not supported"));
    }
}
