use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wordwise_types::ResultShape;

/// Which translation backend a session talks to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Http,
    Stub,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Http => f.write_str("http"),
            BackendKind::Stub => f.write_str("stub"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(BackendKind::Http),
            "stub" | "mock" => Ok(BackendKind::Stub),
            other => Err(format!("unknown backend: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub shape: ResultShape,
}

impl BackendConfig {
    pub fn new() -> Self {
        let kind = env::var("WORDWISE_BACKEND")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let shape = env::var("WORDWISE_RESULT_SHAPE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self { kind, shape }
    }
}
