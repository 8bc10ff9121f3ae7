//! Restructure command - schema recommendations for one file.

use std::path::PathBuf;

use csvdiff::CsvDiff;
use csvdiff::llm::Task;

use super::{CommandResult, build_config, emit};
use crate::cli::CommonArgs;

pub fn run(
    file: PathBuf,
    format: String,
    table_name: Option<String>,
    common: CommonArgs,
) -> CommandResult {
    let csvdiff = CsvDiff::with_config(build_config(&common)?);
    let result = csvdiff.restructure(&file, &format, table_name.as_deref())?;
    emit(&result, Task::Restructure, &common)
}
