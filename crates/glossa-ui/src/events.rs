use slint::ComponentHandle;

use crate::PopupWindow;
use crate::bridge::UiCommand;
use crate::state::UiState;

/// Apply one command on the UI thread; `false` once the loop should stop
pub fn handle_command(command: UiCommand, state: &mut UiState) -> bool {
    match command {
        UiCommand::Show { text, position } => {
            close_popup(state);
            match open_popup(&text, position.x, position.y, state) {
                Ok(popup) => {
                    tracing::debug!("[SLINT] Popup at ({}, {})", position.x, position.y);
                    state.popup = Some(popup);
                }
                Err(e) => tracing::error!("[SLINT] Failed to open popup: {}", e),
            }
            true
        }
        UiCommand::Hide => {
            close_popup(state);
            true
        }
        UiCommand::Quit => {
            close_popup(state);
            slint::quit_event_loop().ok();
            false
        }
    }
}

fn open_popup(text: &str, x: i32, y: i32, state: &UiState) -> anyhow::Result<PopupWindow> {
    let popup = PopupWindow::new()?;
    popup.set_text(text.into());
    popup.set_font_family_name(state.font_family.as_str().into());
    popup.set_text_size(state.font_size);
    popup
        .window()
        .set_position(slint::PhysicalPosition::new(x, y));
    popup.show()?;
    Ok(popup)
}

fn close_popup(state: &mut UiState) {
    if let Some(popup) = state.popup.take() {
        popup.hide().ok();
        tracing::debug!("[SLINT] Popup closed");
    }
}
