use std::env;

use serde::{Deserialize, Serialize};

fn default_copy_feedback_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long the "copied" marker stays on a field
    #[serde(default = "default_copy_feedback_ms")]
    pub copy_feedback_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            copy_feedback_ms: default_copy_feedback_ms(),
        }
    }
}

impl UiConfig {
    pub fn new() -> Self {
        let copy_feedback_ms = env::var("WORDWISE_COPY_FEEDBACK_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_copy_feedback_ms);

        Self { copy_feedback_ms }
    }
}
