//! Prompt templates embedding structured analysis results.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::provider::LlmProvider;
use crate::error::Result;

/// Analysis task a prompt is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    Summarize,
    Compare,
    Validate,
    Clean,
    Restructure,
    GenerateTests,
    ExplainCode,
}

impl Task {
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Summarize => "summarize",
            Task::Compare => "compare",
            Task::Validate => "validate",
            Task::Clean => "clean",
            Task::Restructure => "restructure",
            Task::GenerateTests => "generate_tests",
            Task::ExplainCode => "explain_code",
        }
    }

    /// Question asked when the caller supplies none.
    pub fn default_question(&self) -> &'static str {
        match self {
            Task::Summarize => "Summarize this dataset",
            Task::Compare => "What are the key differences between these datasets?",
            Task::Validate => "What data quality issues exist in this dataset?",
            Task::Clean => "How should I clean this dataset?",
            Task::Restructure => "How should I restructure this dataset's schema?",
            Task::GenerateTests => "What tests should I write for this dataset?",
            Task::ExplainCode => "What does this code do?",
        }
    }

    fn instructions(&self) -> &'static str {
        match self {
            Task::Summarize => {
                "Describe what the dataset contains, the type and range of each column, \
                 and anything notable about missing or unusual values."
            }
            Task::Compare => {
                "Explain the structural changes, the columns whose values changed and by how \
                 much, and any type changes. Values were compared row by row by position."
            }
            Task::Validate => {
                "Explain each issue found, how serious it is, and what could have caused it."
            }
            Task::Clean => {
                "Explain the recommended cleaning steps in order and their expected impact \
                 on the data."
            }
            Task::Restructure => {
                "Explain the recommended schema changes, including keys, lookup tables and \
                 type conversions."
            }
            Task::GenerateTests => {
                "Explain the generated data tests and suggest any that are missing."
            }
            Task::ExplainCode => {
                "Explain what the code in the request does, step by step, at the requested \
                 detail_level and for the requested audience. If a focus is given, spend \
                 most of the answer on it. Point out what the code assumes about its input \
                 data and where it could silently lose or change rows."
            }
        }
    }

    fn preamble(&self) -> &'static str {
        match self {
            Task::ExplainCode => {
                "You are a data engineer explaining a data-processing script to a colleague"
            }
            _ => "You are a data analyst reviewing the output of an automated CSV analysis",
        }
    }

    fn payload_heading(&self) -> &'static str {
        match self {
            Task::ExplainCode => "Code Request (JSON)",
            _ => "Analysis Result (JSON)",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a prompt embedding `payload` as pretty JSON.
pub fn build_prompt<T: Serialize + ?Sized>(
    task: Task,
    question: Option<&str>,
    payload: &T,
) -> Result<String> {
    let question = question
        .filter(|q| !q.trim().is_empty())
        .unwrap_or_else(|| task.default_question());
    let data = serde_json::to_string_pretty(payload)?;

    Ok(format!(
        r#"{preamble} ({task}).

## {heading}
```json
{data}
```

## Instructions
{instructions}
Base your answer only on the {basis} above.

## Question
{question}"#,
        preamble = task.preamble(),
        task = task,
        heading = task.payload_heading(),
        data = data,
        basis = if task == Task::ExplainCode { "code" } else { "analysis result" },
        instructions = task.instructions(),
        question = question,
    ))
}

/// Build the prompt and send it to `provider`.
pub fn explain<T: Serialize + ?Sized>(
    provider: &dyn LlmProvider,
    task: Task,
    question: Option<&str>,
    payload: &T,
) -> Result<String> {
    let prompt = build_prompt(task, question, payload)?;
    debug!(
        "Sending {} prompt ({} chars) to {}",
        task,
        prompt.len(),
        provider.name()
    );
    provider.complete(&prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{Audience, CodeExplanationRequest, MockProvider};
    use serde_json::json;

    #[test]
    fn test_prompt_embeds_payload_and_question() {
        let payload = json!({ "total_rows": 5 });
        let prompt = build_prompt(Task::Validate, Some("Any nulls?"), &payload).unwrap();
        assert!(prompt.contains("\"total_rows\": 5"));
        assert!(prompt.contains("Any nulls?"));
        assert!(prompt.contains("(validate)"));
    }

    #[test]
    fn test_default_question() {
        let prompt = build_prompt(Task::Summarize, None, &json!({})).unwrap();
        assert!(prompt.ends_with("Summarize this dataset"));

        let blank = build_prompt(Task::Clean, Some("  "), &json!({})).unwrap();
        assert!(blank.ends_with(Task::Clean.default_question()));
    }

    #[test]
    fn test_explain_code_prompt() {
        let request = CodeExplanationRequest::from_code("SELECT id FROM orders WHERE total > 10")
            .unwrap()
            .with_audience(Audience::Beginner)
            .with_focus("the WHERE clause");
        let mock = MockProvider::with_response("It filters orders.");

        let answer = explain(&mock, Task::ExplainCode, None, &request).unwrap();
        assert_eq!(answer, "It filters orders.");

        let prompt = mock.last_prompt().unwrap();
        assert!(prompt.contains("## Code Request (JSON)"));
        assert!(prompt.contains("\"language\": \"sql\""));
        assert!(prompt.contains("\"audience\": \"beginner\""));
        assert!(prompt.contains("the WHERE clause"));
        assert!(prompt.ends_with("What does this code do?"));
    }

    #[test]
    fn test_explain_round_trip() {
        let mock = MockProvider::with_response("Mocked LLM response");
        let answer = explain(&mock, Task::Compare, Some("What changed?"), &json!({"a": 1})).unwrap();
        assert_eq!(answer, "Mocked LLM response");
        assert!(mock.last_prompt().unwrap().contains("What changed?"));
    }
}
