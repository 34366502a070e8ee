use std::env;

use serde::{Deserialize, Serialize};
use wordwise_types::{AUTO_DETECT, ResultShape};

pub(crate) fn default_source_lang(shape: ResultShape) -> String {
    match shape {
        ResultShape::Structured => "en".to_string(),
        ResultShape::PlainText => AUTO_DETECT.to_string(),
    }
}

fn default_structured_source_lang() -> String {
    default_source_lang(ResultShape::Structured)
}

fn default_target_lang() -> String {
    "es".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    #[serde(default = "default_structured_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    /// Overrides the per-shape history capacity
    pub history_capacity: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            source_lang: default_structured_source_lang(),
            target_lang: default_target_lang(),
            history_capacity: None,
        }
    }
}

impl SessionConfig {
    pub fn new(shape: ResultShape) -> Self {
        let source_lang =
            env::var("WORDWISE_SOURCE_LANG").unwrap_or_else(|_| default_source_lang(shape));
        let target_lang = env::var("WORDWISE_TARGET_LANG").unwrap_or_else(|_| default_target_lang());

        let history_capacity = env::var("WORDWISE_HISTORY_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|capacity: &usize| *capacity > 0);

        Self {
            source_lang,
            target_lang,
            history_capacity,
        }
    }
}
