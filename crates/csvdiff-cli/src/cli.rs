//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// csvdiff: profile, compare and validate delimited tabular files
#[derive(Parser)]
#[command(name = "csvdiff")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile a file: types, nulls, distinct counts and statistics
    Summarize {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Compare two files column by column and row by row
    Compare {
        #[arg(value_name = "FILE1")]
        file1: PathBuf,

        #[arg(value_name = "FILE2")]
        file2: PathBuf,

        /// Separator for the first file (overrides --sep)
        #[arg(long)]
        sep1: Option<String>,

        /// Separator for the second file (overrides --sep)
        #[arg(long)]
        sep2: Option<String>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Detect data-quality issues
    Validate {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Recommend cleaning steps for the issues found
    Clean {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Recommend keys, lookup tables and type conversions
    Restructure {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Target format: sql, mermaid or python
        #[arg(short, long, default_value = "sql")]
        format: String,

        /// Table name (default: file name without extension)
        #[arg(long)]
        table_name: Option<String>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Generate data tests from the observed data
    GenerateTests {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Test framework: pytest, great_expectations or dbt
        #[arg(long, default_value = "pytest")]
        framework: String,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Print an LLM prompt explaining a Python or SQL script
    ExplainCode(ExplainCodeArgs),
}

#[derive(Args, Clone, Debug)]
pub struct ExplainCodeArgs {
    /// Script file to explain
    #[arg(value_name = "FILE", conflicts_with = "code")]
    pub file: Option<PathBuf>,

    /// Code text to explain instead of a file
    #[arg(long)]
    pub code: Option<String>,

    /// Language: python or sql (detected when omitted)
    #[arg(long)]
    pub language: Option<String>,

    /// Detail level: low, medium or high
    #[arg(long, default_value = "medium")]
    pub detail_level: String,

    /// Audience: beginner, intermediate or expert
    #[arg(long, default_value = "intermediate")]
    pub audience: String,

    /// Part of the code to concentrate on
    #[arg(long)]
    pub focus: Option<String>,

    /// Question to put in the prompt
    #[arg(long, visible_alias = "question")]
    pub ask: Option<String>,

    /// LLM provider the prompt is meant for: openai or gemini
    #[arg(long, default_value = "gemini")]
    pub provider: String,

    /// Write the prompt to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Options shared by every subcommand.
#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    /// Field separator (auto-detected when omitted): a character, or tab,
    /// comma, semicolon, pipe
    #[arg(short, long)]
    pub sep: Option<String>,

    /// Maximum data rows to load
    #[arg(long)]
    pub max_rows: Option<usize>,

    /// Maximum columns to load, in file order
    #[arg(long)]
    pub max_cols: Option<usize>,

    /// Null percentage above which a column is reported
    #[arg(long)]
    pub null_threshold: Option<f64>,

    /// Distinct percentage above which a text column is reported
    #[arg(long)]
    pub cardinality_threshold: Option<f64>,

    /// Z-score above which a value is an outlier
    #[arg(long)]
    pub outlier_threshold: Option<f64>,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the LLM prompt for the result instead of JSON
    #[arg(long)]
    pub prompt: bool,

    /// Question to put in the prompt (implies --prompt)
    #[arg(long, visible_alias = "question")]
    pub ask: Option<String>,

    /// LLM provider the prompt is meant for: openai or gemini
    #[arg(long, default_value = "gemini")]
    pub provider: String,
}

impl Default for CommonArgs {
    fn default() -> Self {
        Self {
            sep: None,
            max_rows: None,
            max_cols: None,
            null_threshold: None,
            cardinality_threshold: None,
            outlier_threshold: None,
            output: None,
            prompt: false,
            ask: None,
            provider: "gemini".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compare() {
        let cli = Cli::try_parse_from([
            "csvdiff", "compare", "a.csv", "b.csv", "--sep1", ";", "--max-rows", "10",
        ])
        .unwrap();
        match cli.command {
            Commands::Compare {
                file1, sep1, common, ..
            } => {
                assert_eq!(file1, PathBuf::from("a.csv"));
                assert_eq!(sep1.as_deref(), Some(";"));
                assert_eq!(common.max_rows, Some(10));
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_parse_explain_code() {
        let cli = Cli::try_parse_from([
            "csvdiff",
            "explain-code",
            "clean.py",
            "--detail-level",
            "high",
            "--focus",
            "dropna",
        ])
        .unwrap();
        match cli.command {
            Commands::ExplainCode(args) => {
                assert_eq!(args.file, Some(PathBuf::from("clean.py")));
                assert_eq!(args.detail_level, "high");
                assert_eq!(args.audience, "intermediate");
                assert_eq!(args.focus.as_deref(), Some("dropna"));
            }
            _ => panic!("expected explain-code"),
        }

        let both = Cli::try_parse_from(["csvdiff", "explain-code", "a.py", "--code", "x = 1"]);
        assert!(both.is_err());
    }

    #[test]
    fn test_question_alias() {
        let cli = Cli::try_parse_from(["csvdiff", "validate", "a.csv", "--question", "Why?"])
            .unwrap();
        match cli.command {
            Commands::Validate { common, .. } => assert_eq!(common.ask.as_deref(), Some("Why?")),
            _ => panic!("expected validate"),
        }
    }
}
