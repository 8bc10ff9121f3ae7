//! Generate-tests command - framework-agnostic test specs.

use std::path::PathBuf;

use csvdiff::CsvDiff;
use csvdiff::llm::Task;

use super::{CommandResult, build_config, emit};
use crate::cli::CommonArgs;

pub fn run(file: PathBuf, framework: String, common: CommonArgs) -> CommandResult {
    let csvdiff = CsvDiff::with_config(build_config(&common)?);
    let generated = csvdiff.generate_tests(&file, &framework)?;
    emit(&generated, Task::GenerateTests, &common)
}
