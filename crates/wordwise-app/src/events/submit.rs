use std::sync::Arc;

use kanal::AsyncSender;
use wordwise_core::state::Session;
use wordwise_core::types::AppEvent;

use crate::state::AppState;

/// Start a lookup for the current input. The request runs on its own task and
/// reports back through `LookupFinished` so the loop stays responsive.
pub fn handle_submit(
    state: &Arc<AppState>,
    session: &mut Session,
    ui_to_app_tx: &AsyncSender<AppEvent>,
) -> bool {
    let Some(pending) = session.submit() else {
        return false;
    };

    let translator = state.translator.clone();
    let tx = ui_to_app_tx.clone();
    tokio::spawn(async move {
        let generation = pending.generation();
        let outcome = pending.run(translator.as_ref()).await;
        if let Err(e) = tx
            .send(AppEvent::LookupFinished {
                generation,
                outcome,
            })
            .await
        {
            tracing::error!("Failed to deliver lookup {generation} result: {e}");
        }
    });

    true
}
