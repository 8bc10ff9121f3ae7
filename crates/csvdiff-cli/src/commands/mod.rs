//! CLI command implementations.

pub mod clean;
pub mod compare;
pub mod explain_code;
pub mod generate_tests;
pub mod restructure;
pub mod summarize;
pub mod validate;

use std::error::Error;
use std::fs;
use std::path::Path;

use colored::Colorize;
use csvdiff::CsvDiffConfig;
use csvdiff::input::parse_separator;
use csvdiff::llm::{ProviderKind, Task, build_prompt};
use log::warn;
use serde::Serialize;

use crate::cli::CommonArgs;

pub type CommandResult = Result<(), Box<dyn Error>>;

/// Build the library configuration from the shared flags.
pub fn build_config(common: &CommonArgs) -> Result<CsvDiffConfig, Box<dyn Error>> {
    provider(common)?;
    let mut config = CsvDiffConfig::default();

    config.parser.separator = separator(common.sep.as_deref())?;
    if let Some(max_rows) = common.max_rows {
        config.parser.max_rows = max_rows;
    }
    config.parser.max_cols = common.max_cols;

    if let Some(value) = common.null_threshold {
        config.thresholds.null_threshold = value;
    }
    if let Some(value) = common.cardinality_threshold {
        config.thresholds.cardinality_threshold = value;
    }
    if let Some(value) = common.outlier_threshold {
        config.thresholds.outlier_threshold = value;
    }
    config.thresholds.validate()?;
    config.parser.validate()?;

    Ok(config)
}

pub fn separator(value: Option<&str>) -> Result<Option<u8>, Box<dyn Error>> {
    Ok(value.map(parse_separator).transpose()?)
}

/// Resolve the provider name up front so a typo fails before any work.
pub fn provider(common: &CommonArgs) -> Result<ProviderKind, Box<dyn Error>> {
    Ok(common.provider.parse::<ProviderKind>()?)
}

/// Print or write `value` as JSON, or as an LLM prompt when asked for one.
pub fn emit<T: Serialize>(value: &T, task: Task, common: &CommonArgs) -> CommandResult {
    let text = if common.prompt || common.ask.is_some() {
        render_prompt(value, task, common.ask.as_deref(), provider(common)?)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    write_text(&text, common.output.as_deref())
}

/// Build the prompt for `task`, noting which provider it is meant for.
pub fn render_prompt<T: Serialize>(
    value: &T,
    task: Task,
    question: Option<&str>,
    provider: ProviderKind,
) -> Result<String, Box<dyn Error>> {
    if provider.api_key_from_env().is_none() {
        warn!(
            "No API key for {} in {}",
            provider,
            provider.api_key_env().join(" or ")
        );
    }
    eprintln!(
        "{} {} ({})",
        "Prompt for".cyan().bold(),
        provider,
        provider.default_model()
    );
    Ok(build_prompt(task, question, value)?)
}

/// Write `text` to `output`, or to stdout when no path is given.
pub fn write_text(text: &str, output: Option<&Path>) -> CommandResult {
    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", text))?;
            println!(
                "{} {}",
                "Wrote".green().bold(),
                path.display().to_string().white()
            );
        }
        None => println!("{}", text),
    }
    Ok(())
}
