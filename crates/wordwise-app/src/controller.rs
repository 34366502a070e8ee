use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use wordwise_core::types::AppEvent;
use wordwise_io::clipboard::ClipboardWriter;

use crate::events::event_loop;
use crate::state::AppState;
use crate::ui::{UiUpdate, ui_loop};

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<UiUpdate>, AsyncReceiver<UiUpdate>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(capacity),
            ui_to_app: kanal::bounded_async(capacity),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, queue_capacity: usize) -> Self {
        Self {
            channels: ChannelSet::new(queue_capacity),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Sender the shell (or a test) uses to feed events to the session loop.
    pub fn event_sender(&self) -> AsyncSender<AppEvent> {
        self.channels.ui_to_app.0.clone()
    }

    /// Sender for messages that bypass the session (e.g. shell parse errors).
    pub fn notice_sender(&self) -> AsyncSender<UiUpdate> {
        self.channels.app_to_ui.0.clone()
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn spawn_tasks(&self, clipboard: Box<dyn ClipboardWriter>) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Session loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.channels.app_to_ui.0.clone(),
            clipboard,
            self.cancel_token.child_token(),
        ));

        // UI loop
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
