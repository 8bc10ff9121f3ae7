//! Load-then-profile pass producing a [`Dataset`].

use std::path::Path;

use log::info;

use super::Dataset;
use super::profiler::{Profiler, ProfilerConfig};
use crate::error::Result;
use crate::input::{Parser, ParserConfig};

/// Reads a bounded slice of a file and profiles it in one pass.
pub struct Preprocessor {
    parser: Parser,
    profiler: Profiler,
}

impl Preprocessor {
    /// Create a preprocessor with default caps and profiling settings.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default(), ProfilerConfig::default())
    }

    /// Create a preprocessor with custom settings.
    pub fn with_config(parser: ParserConfig, profiler: ProfilerConfig) -> Self {
        Self {
            parser: Parser::with_config(parser),
            profiler: Profiler::with_config(profiler),
        }
    }

    /// Load and profile a file. Either the whole pass succeeds or nothing is
    /// returned.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<Dataset> {
        let path = path.as_ref();
        let (table, source) = self.parser.parse_file(path)?;
        let metadata = self.profiler.profile(&table, &source);

        info!(
            "Profiled {}: {} rows, {} columns",
            metadata.file_name, metadata.total_rows, metadata.total_columns
        );

        Ok(Dataset { metadata, table })
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::schema::ColumnType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_analyze_semicolon_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "id;name;score").unwrap();
        writeln!(file, "1;Alice;90.5").unwrap();
        writeln!(file, "2;Bob;NA").unwrap();
        writeln!(file, "3;Carol;77.0").unwrap();
        file.flush().unwrap();

        let dataset = Preprocessor::new().analyze(file.path()).unwrap();
        let metadata = &dataset.metadata;

        assert_eq!(metadata.separator, ';');
        assert!(metadata.separator_detected);
        assert_eq!(metadata.total_rows, 3);
        assert_eq!(metadata.column_names, vec!["id", "name", "score"]);
        assert_eq!(metadata.column("id").unwrap().inferred_type, ColumnType::Integer);
        assert_eq!(metadata.column("score").unwrap().inferred_type, ColumnType::Float);
        assert_eq!(metadata.column("score").unwrap().null_count, 1);
        assert_eq!(dataset.table.row_count(), 3);
    }

    #[test]
    fn test_analyze_row_cap() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "a,b").unwrap();
        for i in 0..50 {
            writeln!(file, "{},{}", i, i * 2).unwrap();
        }
        file.flush().unwrap();

        let config = ParserConfig {
            max_rows: 10,
            ..Default::default()
        };
        let dataset = Preprocessor::with_config(config, ProfilerConfig::default())
            .analyze(file.path())
            .unwrap();

        assert_eq!(dataset.metadata.total_rows, 10);
        assert_eq!(dataset.metadata.row_limit, 10);
        assert!(dataset.metadata.possibly_truncated());
    }

    #[test]
    fn test_analyze_missing_file() {
        let err = Preprocessor::new().analyze("nonexistent_file.csv").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::File);
        assert!(err.to_string().contains("File not found"));
    }
}
