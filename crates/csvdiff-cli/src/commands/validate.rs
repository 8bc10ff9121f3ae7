//! Validate command - detect data-quality issues.

use std::path::PathBuf;

use colored::Colorize;
use csvdiff::CsvDiff;
use csvdiff::llm::Task;

use super::{CommandResult, build_config, emit};
use crate::cli::CommonArgs;

pub fn run(file: PathBuf, common: CommonArgs) -> CommandResult {
    let result = CsvDiff::with_config(build_config(&common)?).validate(&file)?;

    if result.has_issues() {
        eprintln!(
            "{} {} issues in {} columns",
            "Found".yellow().bold(),
            result.summary.total_issues,
            result.summary.columns_with_issues.len()
        );
    } else {
        eprintln!("{}", "No issues found".green().bold());
    }

    emit(&result, Task::Validate, &common)
}
