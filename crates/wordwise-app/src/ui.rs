use kanal::AsyncReceiver;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

/// What the session loop asks the terminal to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    /// Full redraw of the session
    Frame(String),
    /// One-off message (history listing, help, state dump)
    Notice(String),
    Quit,
}

pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<UiUpdate>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();

    loop {
        let update = tokio::select! {
            _ = cancel.cancelled() => break,
            update = app_to_ui_rx.recv() => update?,
        };

        let text = match update {
            UiUpdate::Frame(frame) => frame,
            UiUpdate::Notice(notice) => notice,
            UiUpdate::Quit => break,
        };
        stdout.write_all(text.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    tracing::debug!("UI loop stopping");
    Ok(())
}
