use glossa_config::overlay::OverlayConfig;

use crate::PopupWindow;

/// UI-thread state; at most one popup alive
pub struct UiState {
    pub popup: Option<PopupWindow>,
    pub font_family: String,
    pub font_size: f32,
}

impl UiState {
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            popup: None,
            font_family: config.font_family.clone(),
            font_size: config.font_size,
        }
    }
}
