mod bridge;
mod events;
mod state;

use glossa_config::overlay::OverlayConfig;
use kanal::AsyncReceiver;

pub use bridge::{SlintOverlay, UiCommand};

use crate::events::handle_command;
use crate::state::UiState;

slint::include_modules!();

/// Run the Slint event loop on the calling (main) thread until `Quit`
///
/// Popups are driven by the commands a [`SlintOverlay`] sends through `rx`.
pub fn ui_loop(config: &OverlayConfig, rx: AsyncReceiver<UiCommand>) -> anyhow::Result<()> {
    let mut state = UiState::new(config);

    slint::spawn_local(async move {
        while let Ok(command) = rx.recv().await {
            if !handle_command(command, &mut state) {
                return;
            }
        }
        tracing::debug!("[SLINT] Command channel closed");
        slint::quit_event_loop().ok();
    })?;

    tracing::info!("[SLINT] Event loop running");
    slint::run_event_loop_until_quit()?;
    tracing::info!("[SLINT] Event loop finished");

    Ok(())
}
