use std::io::{BufRead, BufReader};
use std::thread;

use kanal::AsyncSender;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use wordwise_core::types::AppEvent;

use crate::shell::parse_line;
use crate::ui::UiUpdate;

/// Read prompt lines from stdin on a plain thread so a pending read never
/// holds up runtime shutdown. End of input quits the session.
pub fn spawn_input_reader(
    handle: Handle,
    event_tx: AsyncSender<AppEvent>,
    notice_tx: AsyncSender<UiUpdate>,
    cancel: CancellationToken,
) -> thread::JoinHandle<()> {
    spawn_line_reader(
        BufReader::new(std::io::stdin()),
        handle,
        event_tx,
        notice_tx,
        cancel,
    )
}

/// Feed parsed lines from `input` into the session loop.
pub fn spawn_line_reader<R>(
    input: R,
    handle: Handle,
    event_tx: AsyncSender<AppEvent>,
    notice_tx: AsyncSender<UiUpdate>,
    cancel: CancellationToken,
) -> thread::JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in input.lines() {
            if cancel.is_cancelled() {
                break;
            }

            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!("Failed to read input: {e}");
                    break;
                }
            };

            let events = match parse_line(&line) {
                Ok(events) => events,
                Err(message) => {
                    if let Err(e) = handle.block_on(notice_tx.send(UiUpdate::Notice(message))) {
                        tracing::debug!("ui loop gone: {e}");
                    }
                    continue;
                }
            };

            for event in events {
                if let Err(e) = handle.block_on(event_tx.send(event)) {
                    tracing::debug!("session loop gone: {e}");
                    return;
                }
            }
        }

        if let Err(e) = handle.block_on(event_tx.send(AppEvent::Quit)) {
            tracing::debug!("session loop gone before quit: {e}");
        }
        tracing::debug!("input reader stopping");
    })
}
