mod http;
mod stub;
mod wire;

pub use http::HttpTranslator;
pub use stub::StubTranslator;
pub use wire::{LookupRequest, LookupResponse};

use wordwise_types::{LookupResult, Translation};

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Look up a single word: translation, meaning and usage examples
    async fn lookup(&self, request: &LookupRequest) -> Result<LookupResult, TranslateError>;

    /// Translate free text between two languages (given by display name)
    async fn translate(&self, text: &str, from: &str, to: &str)
    -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_network: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}
