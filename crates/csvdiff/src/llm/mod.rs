//! Boundary to language-model explanation.
//!
//! The engine builds prompts from structured results and hands them to an
//! [`LlmProvider`]. Provider clients that talk to a network API implement
//! the trait outside this crate; [`MockProvider`] is included for tests.
//! Scripts can be explained too: a [`CodeExplanationRequest`] is the payload
//! for [`Task::ExplainCode`].
//!
//! # Example
//!
//! ```no_run
//! use csvdiff::CsvDiff;
//! use csvdiff::llm::{MockProvider, Task, explain};
//!
//! let csvdiff = CsvDiff::new();
//! let metadata = csvdiff.summarize("data.csv").unwrap();
//! let answer = explain(&MockProvider::new(), Task::Summarize, None, &metadata).unwrap();
//! println!("{}", answer);
//! ```

mod code;
mod mock;
mod prompts;
mod provider;

pub use code::{Audience, CodeExplanationRequest, CodeLanguage, DetailLevel, detect_language};
pub use mock::MockProvider;
pub use prompts::{Task, build_prompt, explain};
pub use provider::{LlmConfig, LlmProvider, ProviderKind};
