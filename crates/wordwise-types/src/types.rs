use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Source-side sentinel meaning "let the backend detect the language".
pub const AUTO_DETECT: &str = "auto";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub display_name: String,
}

impl Language {
    pub fn new(code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
        }
    }
}

/// One usage example, in the order the service returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub id: String,
    pub text: String,
}

/// Structured word lookup, replaced wholesale on every successful submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    pub source_word: String,
    pub translation: String,
    pub target_language_name: String,
    pub meaning: String,
    pub examples: Vec<Example>,
}

/// Plain-text translation produced by the bidirectional variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub text: String,
    pub from: String,
    pub to: String,
    pub provider: String,
}

/// Which kind of result a session asks its backend for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultShape {
    #[default]
    Structured,
    PlainText,
}

impl ResultShape {
    /// History capacity used when nothing overrides it.
    pub fn default_history_capacity(self) -> usize {
        match self {
            ResultShape::Structured => 10,
            ResultShape::PlainText => 5,
        }
    }
}

impl fmt::Display for ResultShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultShape::Structured => f.write_str("structured"),
            ResultShape::PlainText => f.write_str("plain-text"),
        }
    }
}

impl FromStr for ResultShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "structured" => Ok(ResultShape::Structured),
            "plain-text" | "plain" | "plaintext" => Ok(ResultShape::PlainText),
            other => Err(format!("unknown result shape: {other}")),
        }
    }
}
