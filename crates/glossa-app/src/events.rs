use std::sync::Arc;

use glossa_core::{OverlayEvent, OverlayMachine, OverlaySurface};
use glossa_types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod trigger_capture;

use trigger_capture::handle_capture_trigger;

/// Controller loop; the only owner of the overlay state
pub async fn event_loop<S: OverlaySurface>(
    state: Arc<AppState>,
    event_rx: AsyncReceiver<AppEvent>,
    event_tx: AsyncSender<AppEvent>,
    mut machine: OverlayMachine<S>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Waiting for triggers");

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = event_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => break,
            },
        };

        handle_event(&state, &mut machine, &event_tx, event);
    }

    machine.reset();
    tracing::info!("[EVENT_LOOP] Stopped");
    Ok(())
}

fn handle_event<S: OverlaySurface>(
    state: &Arc<AppState>,
    machine: &mut OverlayMachine<S>,
    event_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) {
    match event {
        AppEvent::Input(input) => {
            if !state.trigger.matches(&input) {
                return;
            }

            if machine.state().is_busy() {
                state.stats.record_dropped_trigger();
            } else if machine.state().is_hidden() && state.capture_slot.is_taken() {
                // A timed-out run is still inside the capture/OCR thread
                tracing::debug!(">>> [CAPTURE] Previous run still executing, trigger dropped");
                state.stats.record_dropped_trigger();
                return;
            }

            let cursor = input.position();
            if let Some(cursor) = machine.handle(OverlayEvent::Trigger { cursor }) {
                tracing::debug!(">>> [CAPTURE] Triggered at {:?}", cursor);
                tokio::spawn(handle_capture_trigger(
                    state.clone(),
                    cursor,
                    event_tx.clone(),
                ));
            }
        }
        AppEvent::CaptureFinished { outcome } => {
            machine.handle(OverlayEvent::CaptureFinished(outcome));
        }
    }
}
