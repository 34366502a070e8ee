use std::time::Duration;

use async_trait::async_trait;
use wordwise_types::{AUTO_DETECT, Example, LookupResult, Translation};

use crate::wire::LookupRequest;
use crate::{ProviderMetadata, TranslateError, Translator};

/// Deterministic offline backend.
#[derive(Debug, Clone, Default)]
pub struct StubTranslator {
    delay: Option<Duration>,
    fail: bool,
}

impl StubTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with an API error.
    pub fn failing() -> Self {
        Self {
            delay: None,
            fail: true,
        }
    }

    /// Sleep before answering, for exercising in-flight behaviour.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn respond(&self) -> Result<(), TranslateError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(TranslateError::Api("stub configured to fail".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Translator for StubTranslator {
    async fn lookup(&self, request: &LookupRequest) -> Result<LookupResult, TranslateError> {
        self.respond().await?;

        let word = &request.word;
        Ok(LookupResult {
            source_word: word.clone(),
            translation: format!("{word} ({})", request.target_language),
            target_language_name: request.target_language.clone(),
            meaning: format!("Definition of \"{word}\""),
            examples: vec![
                Example {
                    id: "1".to_string(),
                    text: format!("I learned the word \"{word}\" today."),
                },
                Example {
                    id: "2".to_string(),
                    text: format!("\"{word}\" appears in this sentence."),
                },
            ],
        })
    }

    async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<Translation, TranslateError> {
        self.respond().await?;

        let from = if from == AUTO_DETECT { "English" } else { from };
        Ok(Translation {
            text: format!("[{to}] {text}"),
            from: from.to_string(),
            to: to.to_string(),
            provider: "stub".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Stub".to_string(),
            requires_network: false,
        }
    }
}
