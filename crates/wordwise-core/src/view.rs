use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wordwise_types::LookupResult;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseViewError {
    #[error("unknown tab: {0}")]
    UnknownTab(String),
    #[error("unknown copy target: {0}")]
    UnknownCopyKey(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultTab {
    #[default]
    Translation,
    Meaning,
    Examples,
}

impl ResultTab {
    pub const ALL: [ResultTab; 3] = [ResultTab::Translation, ResultTab::Meaning, ResultTab::Examples];

    pub fn label(self) -> &'static str {
        match self {
            ResultTab::Translation => "Translation",
            ResultTab::Meaning => "Meaning",
            ResultTab::Examples => "Examples",
        }
    }
}

impl FromStr for ResultTab {
    type Err = ParseViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "translation" | "t" => Ok(ResultTab::Translation),
            "meaning" | "m" => Ok(ResultTab::Meaning),
            "examples" | "e" => Ok(ResultTab::Examples),
            other => Err(ParseViewError::UnknownTab(other.to_string())),
        }
    }
}

/// Identifies one copyable field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CopyKey {
    SourceWord,
    Translation,
    Meaning,
    /// 1-based position in the examples list
    Example(usize),
    Input,
    Output,
}

impl fmt::Display for CopyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyKey::SourceWord => f.write_str("english"),
            CopyKey::Translation => f.write_str("translation"),
            CopyKey::Meaning => f.write_str("meaning"),
            CopyKey::Example(n) => write!(f, "example{n}"),
            CopyKey::Input => f.write_str("input"),
            CopyKey::Output => f.write_str("output"),
        }
    }
}

impl FromStr for CopyKey {
    type Err = ParseViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        match key.as_str() {
            "english" | "word" => Ok(CopyKey::SourceWord),
            "translation" => Ok(CopyKey::Translation),
            "meaning" => Ok(CopyKey::Meaning),
            "input" => Ok(CopyKey::Input),
            "output" => Ok(CopyKey::Output),
            _ => key
                .strip_prefix("example")
                .and_then(|n| n.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
                .map(CopyKey::Example)
                .ok_or_else(|| ParseViewError::UnknownCopyKey(s.trim().to_string())),
        }
    }
}

impl From<CopyKey> for String {
    fn from(key: CopyKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for CopyKey {
    type Error = ParseViewError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleLine<'a> {
    /// 1-based
    pub number: usize,
    pub id: &'a str,
    pub text: &'a str,
    pub copy_key: CopyKey,
}

/// What the result region shows for the active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView<'a> {
    Translation {
        source_word: &'a str,
        translation: &'a str,
        target_language: &'a str,
    },
    Meaning {
        source_word: &'a str,
        meaning: &'a str,
    },
    Examples(Vec<ExampleLine<'a>>),
}

impl<'a> ResultView<'a> {
    /// `None` when there is no result: the region is absent, not empty.
    pub fn project(result: Option<&'a LookupResult>, tab: ResultTab) -> Option<Self> {
        let result = result?;
        let view = match tab {
            ResultTab::Translation => ResultView::Translation {
                source_word: &result.source_word,
                translation: &result.translation,
                target_language: &result.target_language_name,
            },
            ResultTab::Meaning => ResultView::Meaning {
                source_word: &result.source_word,
                meaning: &result.meaning,
            },
            ResultTab::Examples => ResultView::Examples(
                result
                    .examples
                    .iter()
                    .enumerate()
                    .map(|(i, example)| ExampleLine {
                        number: i + 1,
                        id: &example.id,
                        text: &example.text,
                        copy_key: CopyKey::Example(i + 1),
                    })
                    .collect(),
            ),
        };
        Some(view)
    }
}

/// Text behind a structured copy key, if the result has it.
pub fn copy_text<'a>(result: &'a LookupResult, key: &CopyKey) -> Option<&'a str> {
    match key {
        CopyKey::SourceWord => Some(&result.source_word),
        CopyKey::Translation => Some(&result.translation),
        CopyKey::Meaning => Some(&result.meaning),
        CopyKey::Example(n) => n
            .checked_sub(1)
            .and_then(|i| result.examples.get(i))
            .map(|e| e.text.as_str()),
        CopyKey::Input | CopyKey::Output => None,
    }
}
