use kanal::AsyncSender;
use tokio::task::JoinHandle;
use wordwise_core::feedback::CopyTicket;
use wordwise_core::state::Session;
use wordwise_core::types::AppEvent;
use wordwise_core::view::CopyKey;
use wordwise_io::clipboard::ClipboardWriter;

/// Posts `CopyExpired` when the copy marker's window ends. Scheduling a new
/// expiry aborts the previous one.
pub struct ExpiryScheduler {
    tx: AsyncSender<AppEvent>,
    pending: Option<JoinHandle<()>>,
}

impl ExpiryScheduler {
    pub fn new(tx: AsyncSender<AppEvent>) -> Self {
        Self { tx, pending: None }
    }

    pub fn schedule(&mut self, ticket: CopyTicket) {
        self.cancel();

        let tx = self.tx.clone();
        let deadline = tokio::time::Instant::from_std(ticket.expires_at);
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Err(e) = tx.send(AppEvent::CopyExpired(ticket)).await {
                tracing::debug!("copy expiry dropped: {e}");
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

/// Copy one field: clipboard write is fire-and-forget, the marker is not.
pub fn handle_copy(
    session: &mut Session,
    expiry: &mut ExpiryScheduler,
    clipboard: &mut dyn ClipboardWriter,
    key: CopyKey,
) -> bool {
    let now = tokio::time::Instant::now().into_std();
    let Some((text, ticket)) = session.copy(key, now) else {
        tracing::debug!("nothing to copy");
        return false;
    };

    if let Err(e) = clipboard.write_text(&text) {
        tracing::warn!("clipboard write failed: {e:#}");
    }
    expiry.schedule(ticket);
    true
}
