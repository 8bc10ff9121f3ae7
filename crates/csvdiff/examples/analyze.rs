//! Example: profile and validate a tabular data file.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path>

use std::env;

use csvdiff::CsvDiff;
use csvdiff::llm::{MockProvider, Task, build_prompt, explain};

fn main() -> csvdiff::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path>");
        std::process::exit(1);
    }
    let file_path = &args[1];

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("csvdiff analysis: {}", file_path);
    println!("{}", separator);
    println!();

    let csvdiff = CsvDiff::new();
    let metadata = csvdiff.summarize(file_path)?;

    println!("## Source");
    println!("  Separator: {:?}", metadata.separator);
    println!("  Rows: {}", metadata.total_rows);
    println!("  Columns: {}", metadata.total_columns);
    if metadata.possibly_truncated() {
        println!("  (row cap of {} reached)", metadata.row_limit);
    }
    println!();

    println!("## Columns");
    for profile in metadata.profiles() {
        println!(
            "  {:20} {:10} nulls={:<6} distinct={}",
            profile.name,
            profile.inferred_type.as_str(),
            profile.null_count,
            profile.distinct_count
        );
    }
    println!();

    let validation = csvdiff.validate(file_path)?;
    println!("## Issues ({})", validation.summary.total_issues);
    for issue in validation.all_issues() {
        println!(
            "  [{}] {}: {}",
            issue.severity(),
            issue.column(),
            issue.description()
        );
    }
    println!();

    let prompt = build_prompt(Task::Validate, None, &validation)?;
    println!("## Prompt ({} chars)", prompt.len());

    // Swap in a real client to get an explanation.
    let answer = explain(&MockProvider::new(), Task::Validate, None, &validation)?;
    println!("  {}", answer);

    Ok(())
}
