use glossa_types::MouseButton;
use serde::{Deserialize, Serialize};

fn default_mouse_button() -> Option<MouseButton> {
    Some(MouseButton::X2)
}

fn default_poll_interval_ms() -> u64 {
    15
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TriggerConfig {
    /// Mouse button whose press toggles the popup
    #[serde(default = "default_mouse_button")]
    pub mouse_button: Option<MouseButton>,
    /// Optional keyboard alternative, e.g. "Ctrl+Shift+KeyT"
    #[serde(default)]
    pub hotkey: Option<String>,
    /// Input polling period
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            mouse_button: default_mouse_button(),
            hotkey: None,
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}
