//! Summarize command - profile one file.

use std::path::PathBuf;

use csvdiff::CsvDiff;
use csvdiff::llm::Task;

use super::{CommandResult, build_config, emit};
use crate::cli::CommonArgs;

pub fn run(file: PathBuf, common: CommonArgs) -> CommandResult {
    let csvdiff = CsvDiff::with_config(build_config(&common)?);
    let metadata = csvdiff.summarize(&file)?;
    emit(&metadata, Task::Summarize, &common)
}
