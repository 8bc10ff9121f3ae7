//! Bounded CSV/TSV loader with separator detection.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::separator::detect_separator;
use super::source::{DataTable, SourceInfo};
use crate::error::{CsvDiffError, Result};

/// Default cap on loaded data rows.
pub const DEFAULT_MAX_ROWS: usize = 150_000;

/// Parser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Separator to use (None = auto-detect).
    pub separator: Option<u8>,
    /// Maximum data rows to read. Reading stops here; the rest of the file
    /// is never touched.
    pub max_rows: usize,
    /// Maximum columns to keep, in file order (None = all).
    pub max_cols: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            separator: None,
            max_rows: DEFAULT_MAX_ROWS,
            max_cols: None,
            quote: b'"',
        }
    }
}

impl ParserConfig {
    /// Reject caps that could never produce a meaningful load.
    pub fn validate(&self) -> Result<()> {
        if self.max_rows == 0 {
            return Err(CsvDiffError::InvalidConfig(
                "max_rows must be at least 1".to_string(),
            ));
        }
        if self.max_cols == Some(0) {
            return Err(CsvDiffError::InvalidConfig(
                "max_cols must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads a bounded slice of a delimited file.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Validate the path, detect the separator and load at most
    /// `max_rows` x `max_cols` cells.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceInfo)> {
        let path = path.as_ref();
        self.config.validate()?;

        let size_bytes = check_input_file(path)?;

        let (separator, separator_detected, separator_fallback) = match self.config.separator {
            Some(sep) => (sep, false, false),
            None => {
                let detection = detect_separator(path)?;
                (detection.separator, true, detection.fallback)
            }
        };

        let file = File::open(path).map_err(|e| CsvDiffError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(separator)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let raw_headers: Vec<String> = reader
            .headers()
            .map_err(|e| map_csv_error(e, path, 0))?
            .iter()
            .map(|s| s.to_string())
            .collect();

        if raw_headers.is_empty() || raw_headers.iter().all(|h| h.trim().is_empty()) {
            return Err(CsvDiffError::MissingHeader {
                path: path.to_path_buf(),
            });
        }

        let source_columns = raw_headers.len();
        let mut headers = normalize_headers(raw_headers);
        if let Some(max_cols) = self.config.max_cols {
            headers.truncate(max_cols);
        }
        let width = headers.len();

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().take(self.config.max_rows).enumerate() {
            let record = result.map_err(|e| map_csv_error(e, path, row_idx + 1))?;
            let mut row: Vec<String> = record.iter().take(width).map(|s| s.to_string()).collect();

            // Pad short rows with empty (null) cells
            while row.len() < width {
                row.push(String::new());
            }

            rows.push(row);
        }
        // The reader and file handle are dropped here on every path.

        info!(
            "Loaded {} rows x {} columns from {}",
            rows.len(),
            width,
            path.display()
        );

        let source = SourceInfo {
            path: path.to_path_buf(),
            file_name: SourceInfo::file_name_of(path),
            size_bytes,
            separator,
            separator_detected,
            separator_fallback,
            source_columns,
            row_limit: self.config.max_rows,
        };

        Ok((DataTable::new(headers, rows, separator), source))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Ensure the path exists, is a regular file and is non-empty. Returns the
/// file size.
pub fn check_input_file(path: &Path) -> Result<u64> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CsvDiffError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(CsvDiffError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    if !metadata.is_file() {
        return Err(CsvDiffError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    if metadata.len() == 0 {
        return Err(CsvDiffError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    Ok(metadata.len())
}

/// Give blank headers a positional name and make duplicates unique.
fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::with_capacity(raw.len());

    for (idx, name) in raw.into_iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            name
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while headers.contains(&candidate) {
            candidate = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        if candidate != base {
            debug!("Renamed duplicate header '{}' to '{}'", base, candidate);
        }
        headers.push(candidate);
    }

    headers
}

fn map_csv_error(err: csv::Error, path: &Path, row: usize) -> CsvDiffError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Utf8 { .. } => CsvDiffError::Encoding {
            path: path.to_path_buf(),
            row,
        },
        csv::ErrorKind::Io(source) => CsvDiffError::Io {
            path: path.to_path_buf(),
            source,
        },
        _ => CsvDiffError::Parse { row, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_csv() {
        let file = create_test_file("name,age,city\nAlice,30,NYC\nBob,25,LA\n");
        let (table, source) = Parser::new().parse_file(file.path()).unwrap();

        assert_eq!(table.headers, vec!["name", "age", "city"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 0), Some("Alice"));
        assert_eq!(table.get(1, 1), Some("25"));
        assert_eq!(source.separator, b',');
        assert!(source.separator_detected);
    }

    #[test]
    fn test_row_and_column_caps() {
        let file = create_test_file("a,b,c\n1,2,3\n4,5,6\n7,8,9\n");
        let parser = Parser::with_config(ParserConfig {
            max_rows: 2,
            max_cols: Some(2),
            ..ParserConfig::default()
        });
        let (table, source) = parser.parse_file(file.path()).unwrap();

        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec!["1", "2"], vec!["4", "5"]]);
        assert_eq!(source.source_columns, 3);
        assert_eq!(source.row_limit, 2);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let file = create_test_file("a,b,c\n1,2\n4,5,6,7\n");
        let (table, _) = Parser::new().parse_file(file.path()).unwrap();
        assert_eq!(table.rows[0], vec!["1", "2", ""]);
        assert_eq!(table.rows[1], vec!["4", "5", "6"]);
    }

    #[test]
    fn test_duplicate_and_blank_headers() {
        let headers = normalize_headers(vec![
            "id".to_string(),
            "".to_string(),
            "id".to_string(),
            "id".to_string(),
        ]);
        assert_eq!(headers, vec!["id", "Unnamed: 1", "id.1", "id.2"]);
    }

    #[test]
    fn test_missing_file() {
        let err = Parser::new().parse_file("nonexistent_file.csv").unwrap_err();
        assert!(matches!(err, CsvDiffError::FileNotFound { .. }));
    }

    #[test]
    fn test_empty_file() {
        let file = create_test_file("");
        let err = Parser::new().parse_file(file.path()).unwrap_err();
        assert!(matches!(err, CsvDiffError::EmptyFile { .. }));
    }

    #[test]
    fn test_header_only_file() {
        let file = create_test_file("a,b\n");
        let (table, _) = Parser::new().parse_file(file.path()).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_zero_max_rows_rejected() {
        let file = create_test_file("a,b\n1,2\n");
        let parser = Parser::with_config(ParserConfig {
            max_rows: 0,
            ..ParserConfig::default()
        });
        let err = parser.parse_file(file.path()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }

    #[test]
    fn test_invalid_utf8_is_format_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"a,b\n\xff\xfe,2\n").unwrap();
        let err = Parser::new().parse_file(file.path()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Format);
    }
}
