//! Mock LLM provider for testing.

use std::sync::Mutex;

use crate::error::Result;

use super::provider::LlmProvider;

/// Returns a fixed response and records every prompt it receives.
pub struct MockProvider {
    response: String,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::with_response("Mock LLM response")
    }

    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts().pop()
    }

    pub fn call_count(&self) -> usize {
        self.prompts().len()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn complete(&self, prompt: &str) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_prompts() {
        let mock = MockProvider::with_response("ok");
        assert_eq!(mock.complete("first").unwrap(), "ok");
        assert_eq!(mock.complete("second").unwrap(), "ok");
        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.last_prompt().as_deref(), Some("second"));
    }
}
