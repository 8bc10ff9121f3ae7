//! csvdiff CLI - tabular data profiling and quality analysis.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Summarize { file, common } => commands::summarize::run(file, common),

        Commands::Compare {
            file1,
            file2,
            sep1,
            sep2,
            common,
        } => commands::compare::run(file1, file2, sep1, sep2, common),

        Commands::Validate { file, common } => commands::validate::run(file, common),

        Commands::Clean { file, common } => commands::clean::run(file, common),

        Commands::Restructure {
            file,
            format,
            table_name,
            common,
        } => commands::restructure::run(file, format, table_name, common),

        Commands::GenerateTests {
            file,
            framework,
            common,
        } => commands::generate_tests::run(file, framework, common),

        Commands::ExplainCode(args) => commands::explain_code::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
