//! Clean command - cleaning steps for the issues found.

use std::path::PathBuf;

use csvdiff::CsvDiff;
use csvdiff::llm::Task;

use super::{CommandResult, build_config, emit};
use crate::cli::CommonArgs;

pub fn run(file: PathBuf, common: CommonArgs) -> CommandResult {
    let plan = CsvDiff::with_config(build_config(&common)?).clean(&file)?;
    emit(&plan, Task::Clean, &common)
}
