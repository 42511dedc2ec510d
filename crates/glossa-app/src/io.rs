use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use glossa_ocr::{InputListener, button_observable};
use glossa_types::AppEvent;
use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Poll mouse buttons and the hotkey on a blocking thread until cancelled
pub async fn watcher_io(
    state: Arc<AppState>,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let interval = Duration::from_millis(state.config.trigger.poll_interval_ms);
    let hotkey_id = state.trigger.hotkey_id;

    if let Some(button) = state.trigger.mouse_button {
        if button_observable(button) {
            tracing::info!("Trigger: mouse button {:?}", button);
        } else {
            tracing::warn!(
                "Mouse button {:?} is not reported on this platform; set trigger.hotkey or another button",
                button
            );
        }
    }

    tokio::task::spawn_blocking(move || {
        InputListener::new(hotkey_id).run(event_tx, interval, cancel);
    })
    .await
    .context("Input listener crashed")?;

    Ok(())
}
