use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use wordwise_config::Config;
use wordwise_config::backend::BackendKind;
use wordwise_translator::{HttpTranslator, StubTranslator, Translator};

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub translator: Arc<dyn Translator>,
}

impl AppState {
    pub fn new(config: Config, translator: Arc<dyn Translator>) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            translator,
        }
    }

    /// Build the state with whichever backend `config` names.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let translator = build_translator(&config)?;
        Ok(Self::new(config, translator))
    }
}

pub fn build_translator(config: &Config) -> anyhow::Result<Arc<dyn Translator>> {
    let translator: Arc<dyn Translator> = match config.backend.kind {
        BackendKind::Http => Arc::new(HttpTranslator::with_timeout(
            config.network.translate_url(),
            Duration::from_secs(config.network.timeout_seconds),
        )?),
        BackendKind::Stub => Arc::new(StubTranslator::new()),
    };

    let metadata = translator.metadata();
    tracing::info!(
        "Using {} backend (network: {})",
        metadata.name,
        metadata.requires_network
    );
    Ok(translator)
}
