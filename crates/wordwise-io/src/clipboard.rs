use std::sync::{Arc, Mutex};

use anyhow::Context;
use arboard::Clipboard;

/// Destination for copied result fields
pub trait ClipboardWriter: Send {
    fn write_text(&mut self, text: &str) -> Result<(), anyhow::Error>;
}

/// Platform clipboard, opened on first use and kept alive so the
/// contents outlive the write on X11/Wayland.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), anyhow::Error> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new().context("failed to open clipboard")?,
        };
        let clipboard = self.clipboard.insert(clipboard);
        clipboard
            .set_text(text.to_owned())
            .context("failed to write clipboard")?;
        tracing::debug!("copied {} chars to clipboard", text.len());
        Ok(())
    }
}

/// In-memory clipboard that records every write.
#[derive(Clone, Default)]
pub struct MemoryClipboard {
    writes: Arc<Mutex<Vec<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .map(|writes| writes.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.writes().pop()
    }
}

impl ClipboardWriter for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), anyhow::Error> {
        self.writes
            .lock()
            .map_err(|_| anyhow::anyhow!("clipboard lock poisoned"))?
            .push(text.to_owned());
        Ok(())
    }
}
