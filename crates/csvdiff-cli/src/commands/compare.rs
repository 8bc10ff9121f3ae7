//! Compare command - structural and positional value diff of two files.

use std::path::PathBuf;

use colored::Colorize;
use csvdiff::CsvDiff;
use csvdiff::llm::Task;

use super::{CommandResult, build_config, emit, separator};
use crate::cli::CommonArgs;

pub fn run(
    file1: PathBuf,
    file2: PathBuf,
    sep1: Option<String>,
    sep2: Option<String>,
    common: CommonArgs,
) -> CommandResult {
    let config = build_config(&common)?;
    let sep1 = separator(sep1.as_deref())?;
    let sep2 = separator(sep2.as_deref())?;

    let result = CsvDiff::with_config(config).compare_with_separators(&file1, &file2, sep1, sep2)?;

    for warning in &result.warnings {
        eprintln!("{} {}", "Warning:".yellow().bold(), warning);
    }

    emit(&result, Task::Compare, &common)
}
