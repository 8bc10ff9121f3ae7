//! Explain-code command - prompt for explaining a Python or SQL script.

use std::error::Error;

use csvdiff::llm::{Audience, CodeExplanationRequest, CodeLanguage, DetailLevel, ProviderKind, Task};

use super::{CommandResult, render_prompt, write_text};
use crate::cli::ExplainCodeArgs;

pub fn run(args: ExplainCodeArgs) -> CommandResult {
    let provider: ProviderKind = args.provider.parse()?;
    let request = build_request(&args)?;
    let prompt = render_prompt(&request, Task::ExplainCode, args.ask.as_deref(), provider)?;
    write_text(&prompt, args.output.as_deref())
}

/// Resolve every name before the script is read.
fn build_request(args: &ExplainCodeArgs) -> Result<CodeExplanationRequest, Box<dyn Error>> {
    let detail_level: DetailLevel = args.detail_level.parse()?;
    let audience: Audience = args.audience.parse()?;
    let language: Option<CodeLanguage> = args.language.as_deref().map(str::parse).transpose()?;

    let mut request =
        CodeExplanationRequest::from_source(args.code.as_deref(), args.file.as_deref())?
            .with_detail_level(detail_level)
            .with_audience(audience);
    if let Some(language) = language {
        request = request.with_language(language);
    }
    if let Some(focus) = &args.focus {
        request = request.with_focus(focus.as_str());
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args() -> ExplainCodeArgs {
        ExplainCodeArgs {
            file: None,
            code: None,
            language: None,
            detail_level: "medium".to_string(),
            audience: "intermediate".to_string(),
            focus: None,
            ask: None,
            provider: "gemini".to_string(),
            output: None,
        }
    }

    #[test]
    fn test_request_from_file_with_options() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("report.sql");
        fs::write(&script, "select region, sum(total) from sales group by region\n").unwrap();

        let request = build_request(&ExplainCodeArgs {
            file: Some(script),
            detail_level: "high".to_string(),
            audience: "beginner".to_string(),
            focus: Some("the aggregation".to_string()),
            ..args()
        })
        .unwrap();

        assert_eq!(request.language, CodeLanguage::Sql);
        assert_eq!(request.detail_level, DetailLevel::High);
        assert_eq!(request.audience, Audience::Beginner);
        assert_eq!(request.focus.as_deref(), Some("the aggregation"));
        assert_eq!(request.file_name.as_deref(), Some("report.sql"));
    }

    #[test]
    fn test_language_override() {
        let request = build_request(&ExplainCodeArgs {
            code: Some("x = 1".to_string()),
            language: Some("sql".to_string()),
            ..args()
        })
        .unwrap();
        assert_eq!(request.language, CodeLanguage::Sql);
    }

    #[test]
    fn test_no_code_provided() {
        let err = build_request(&args()).unwrap_err();
        assert!(err.to_string().starts_with("No code provided"));
    }

    #[test]
    fn test_bad_names_fail_before_reading() {
        let err = build_request(&ExplainCodeArgs {
            file: Some("missing_script.py".into()),
            audience: "manager".to_string(),
            ..args()
        })
        .unwrap_err();
        assert!(err.to_string().contains("audience 'manager'"));
    }

    #[test]
    fn test_run_writes_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("prompt.md");
        run(ExplainCodeArgs {
            code: Some("import pandas as pd\ndf = pd.read_csv('a.csv')\n".to_string()),
            output: Some(output.clone()),
            ..args()
        })
        .unwrap();

        let prompt = fs::read_to_string(&output).unwrap();
        assert!(prompt.contains("(explain_code)"));
        assert!(prompt.contains("\"language\": \"python\""));
    }
}
