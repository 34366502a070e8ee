use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use wordwise_core::state::Session;
use wordwise_core::types::AppEvent;
use wordwise_io::clipboard::ClipboardWriter;

use crate::render::{render, render_history};
use crate::shell::HELP;
use crate::state::AppState;
use crate::ui::UiUpdate;

pub mod copy;
pub mod submit;

use copy::{ExpiryScheduler, handle_copy};
use submit::handle_submit;

/// What the loop does after an event
enum Flow {
    Redraw,
    Quiet,
    Quit,
}

/// Session loop: the only task that mutates the `Session`.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<UiUpdate>,
    mut clipboard: Box<dyn ClipboardWriter>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut session = {
        let config = state.config.read().await;
        Session::from_config(&config)
    };
    let mut expiry = ExpiryScheduler::new(ui_to_app_tx.clone());

    tracing::info!(shape = %session.shape(), "session started");
    app_to_ui_tx.send(UiUpdate::Frame(render(&session))).await?;

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = ui_to_app_rx.recv() => event?,
        };

        tracing::debug!("event received: {:?}", std::mem::discriminant(&event));
        let flow = handle_events(
            &state,
            &mut session,
            &mut expiry,
            clipboard.as_mut(),
            &ui_to_app_tx,
            &app_to_ui_tx,
            event,
        )
        .await?;

        match flow {
            Flow::Redraw => app_to_ui_tx.send(UiUpdate::Frame(render(&session))).await?,
            Flow::Quiet => {}
            Flow::Quit => {
                app_to_ui_tx.send(UiUpdate::Quit).await?;
                cancel.cancel();
                break;
            }
        }
    }

    expiry.cancel();
    tracing::info!("session loop stopping");
    Ok(())
}

async fn handle_events(
    state: &Arc<AppState>,
    session: &mut Session,
    expiry: &mut ExpiryScheduler,
    clipboard: &mut dyn ClipboardWriter,
    ui_to_app_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<UiUpdate>,
    event: AppEvent,
) -> anyhow::Result<Flow> {
    let flow = match event {
        AppEvent::InputChanged(text) => {
            session.set_input(&text);
            Flow::Quiet
        }
        AppEvent::Submit => {
            if handle_submit(state, session, ui_to_app_tx) {
                Flow::Redraw
            } else {
                Flow::Quiet
            }
        }
        AppEvent::LookupFinished {
            generation,
            outcome,
        } => {
            if session.complete(generation, outcome) {
                Flow::Redraw
            } else {
                Flow::Quiet
            }
        }
        AppEvent::TogglePicker(side) => {
            session.toggle_picker(side);
            Flow::Redraw
        }
        AppEvent::SearchLanguages { side, query } => {
            session.set_language_query(side, &query);
            Flow::Redraw
        }
        AppEvent::SelectLanguage { side, code } => {
            if !session.select_language(side, &code) {
                app_to_ui_tx
                    .send(UiUpdate::Notice(format!("Unknown language code: {code}")))
                    .await?;
            }
            Flow::Redraw
        }
        AppEvent::Swap => {
            if !session.swap() {
                app_to_ui_tx
                    .send(UiUpdate::Notice(
                        "Cannot swap while detecting the source language".to_string(),
                    ))
                    .await?;
            }
            Flow::Redraw
        }
        AppEvent::SelectTab(tab) => {
            session.select_tab(tab);
            Flow::Redraw
        }
        AppEvent::Copy(key) => {
            if handle_copy(session, expiry, clipboard, key) {
                Flow::Redraw
            } else {
                Flow::Quiet
            }
        }
        AppEvent::CopyExpired(ticket) => {
            if session.expire_copy(&ticket) {
                Flow::Redraw
            } else {
                Flow::Quiet
            }
        }
        AppEvent::Clear => {
            session.clear();
            Flow::Redraw
        }
        AppEvent::ShowHistory => {
            app_to_ui_tx
                .send(UiUpdate::Notice(render_history(session)))
                .await?;
            Flow::Quiet
        }
        AppEvent::RecallHistory(index) => {
            if session.recall(index) {
                Flow::Redraw
            } else {
                app_to_ui_tx
                    .send(UiUpdate::Notice(format!("No history entry {}", index + 1)))
                    .await?;
                Flow::Quiet
            }
        }
        AppEvent::ShowState => {
            app_to_ui_tx
                .send(UiUpdate::Notice(session.to_json()?))
                .await?;
            Flow::Quiet
        }
        AppEvent::Help => {
            app_to_ui_tx.send(UiUpdate::Notice(HELP.to_string())).await?;
            Flow::Quiet
        }
        AppEvent::Quit => Flow::Quit,
    };

    Ok(flow)
}
