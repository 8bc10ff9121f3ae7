//! Code explanation requests.
//!
//! A request carries the source text of a data-processing script with its
//! language and how the answer should be pitched. It is the payload for
//! [`Task::ExplainCode`](super::Task::ExplainCode) prompts.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CsvDiffError, Result};
use crate::input::check_input_file;

static SQL_KEYWORDS: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(select|from|where|join|group\s+by|order\s+by|having|union|insert\s+into|create\s+table|with\s+\w+\s+as)\b",
    )
    .ok()
});

static PYTHON_KEYWORDS: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(
        r"(?m)(^\s*(def|class|import|return|elif|except)\b|^\s*from\s+[\w.]+\s+import\b|\b(pd|np|df|self)\.|\bprint\(|:\s*$)",
    )
    .ok()
});

/// Languages a script can be explained in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeLanguage {
    Python,
    Sql,
}

impl CodeLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeLanguage::Python => "python",
            CodeLanguage::Sql => "sql",
        }
    }

    fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "py" | "pyw" => Some(CodeLanguage::Python),
            "sql" => Some(CodeLanguage::Sql),
            _ => None,
        }
    }
}

impl FromStr for CodeLanguage {
    type Err = CsvDiffError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "python" | "py" => Ok(CodeLanguage::Python),
            "sql" => Ok(CodeLanguage::Sql),
            _ => Err(CsvDiffError::InvalidConfig(format!(
                "language '{}' not supported; use python or sql",
                s
            ))),
        }
    }
}

impl fmt::Display for CodeLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much depth the explanation should go into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for DetailLevel {
    type Err = CsvDiffError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(DetailLevel::Low),
            "medium" => Ok(DetailLevel::Medium),
            "high" => Ok(DetailLevel::High),
            _ => Err(CsvDiffError::InvalidConfig(format!(
                "detail level '{}' not supported; use low, medium or high",
                s
            ))),
        }
    }
}

/// Who the explanation is written for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Beginner,
    #[default]
    Intermediate,
    Expert,
}

impl FromStr for Audience {
    type Err = CsvDiffError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Audience::Beginner),
            "intermediate" => Ok(Audience::Intermediate),
            "expert" => Ok(Audience::Expert),
            _ => Err(CsvDiffError::InvalidConfig(format!(
                "audience '{}' not supported; use beginner, intermediate or expert",
                s
            ))),
        }
    }
}

/// Guess the language of `code`.
///
/// A `.py` or `.sql` extension on `file_path` decides outright. Otherwise
/// SQL and Python keyword hits are counted; SQL must strictly win, so
/// ambiguous snippets are treated as Python.
pub fn detect_language(code: &str, file_path: Option<&Path>) -> CodeLanguage {
    if let Some(language) = file_path.and_then(CodeLanguage::from_extension) {
        return language;
    }

    let (sql, python) = (keyword_hits(&SQL_KEYWORDS, code), keyword_hits(&PYTHON_KEYWORDS, code));
    debug!("Language keyword hits: sql={} python={}", sql, python);

    if sql > python {
        CodeLanguage::Sql
    } else {
        CodeLanguage::Python
    }
}

fn keyword_hits(pattern: &Option<Regex>, code: &str) -> usize {
    pattern.as_ref().map_or(0, |re| re.find_iter(code).count())
}

/// A script to explain and how to explain it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeExplanationRequest {
    pub code: String,
    pub language: CodeLanguage,
    pub detail_level: DetailLevel,
    pub audience: Audience,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub line_count: usize,
}

impl CodeExplanationRequest {
    /// Request for inline code text; the language is detected.
    pub fn from_code(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(CsvDiffError::NoCode);
        }
        let language = detect_language(&code, None);
        Ok(Self::build(code, language, None))
    }

    /// Request for the contents of a script file. The extension, when
    /// known, decides the language.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        check_input_file(path)?;
        let code = fs::read_to_string(path).map_err(|e| CsvDiffError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if code.trim().is_empty() {
            return Err(CsvDiffError::NoCode);
        }
        let language = detect_language(&code, Some(path));
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        Ok(Self::build(code, language, file_name))
    }

    /// Inline code when given, else the file; neither is an error.
    pub fn from_source(code: Option<&str>, file: Option<&Path>) -> Result<Self> {
        match (code, file) {
            (Some(code), _) => Self::from_code(code),
            (None, Some(path)) => Self::from_file(path),
            (None, None) => Err(CsvDiffError::NoCode),
        }
    }

    fn build(code: String, language: CodeLanguage, file_name: Option<String>) -> Self {
        let line_count = code.lines().count();
        Self {
            code,
            language,
            detail_level: DetailLevel::default(),
            audience: Audience::default(),
            focus: None,
            file_name,
            line_count,
        }
    }

    /// Override the detected language.
    pub fn with_language(mut self, language: CodeLanguage) -> Self {
        self.language = language;
        self
    }

    pub fn with_detail_level(mut self, detail_level: DetailLevel) -> Self {
        self.detail_level = detail_level;
        self
    }

    pub fn with_audience(mut self, audience: Audience) -> Self {
        self.audience = audience;
        self
    }

    /// Part of the code to concentrate on. Blank text is ignored.
    pub fn with_focus(mut self, focus: impl Into<String>) -> Self {
        let focus = focus.into();
        self.focus = (!focus.trim().is_empty()).then_some(focus);
        self
    }
}
