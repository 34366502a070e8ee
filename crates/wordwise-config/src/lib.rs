use std::env;

use serde::{Deserialize, Serialize};
use wordwise_types::ResultShape;

use self::backend::BackendConfig;
use self::network::NetworkConfig;
use self::session::SessionConfig;
use self::ui::UiConfig;

pub mod backend;
pub mod network;
pub mod session;
pub mod ui;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub ui: UiConfig,

    /// Capacity of the bounded event channels feeding the session loop
    pub event_queue_capacity: usize,
}

impl Config {
    pub fn new() -> Self {
        let event_queue_capacity = env::var("WORDWISE_EVENT_QUEUE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(64);

        let backend = BackendConfig::new();
        let session = SessionConfig::new(backend.shape);

        Config {
            network: NetworkConfig::new(),
            backend,
            session,
            ui: UiConfig::new(),
            event_queue_capacity,
        }
    }

    /// History capacity after applying the per-shape default.
    pub fn history_capacity(&self) -> usize {
        self.session
            .history_capacity
            .unwrap_or_else(|| self.backend.shape.default_history_capacity())
    }

    /// Switch result shape, keeping the shape-dependent defaults consistent.
    pub fn set_shape(&mut self, shape: ResultShape) {
        let previous = self.backend.shape;
        self.backend.shape = shape;
        if self.session.source_lang == session::default_source_lang(previous) {
            self.session.source_lang = session::default_source_lang(shape);
        }
    }
}
