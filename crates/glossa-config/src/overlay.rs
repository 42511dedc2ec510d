use serde::{Deserialize, Serialize};

fn default_offset_x() -> i32 {
    0
}

/// Popup sits above the cursor
fn default_offset_y() -> i32 {
    -100
}

fn default_font_family() -> String {
    "Microsoft YaHei".to_string()
}

fn default_font_size() -> f32 {
    22.0
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OverlayConfig {
    /// Horizontal offset of the popup's top-left from the cursor
    #[serde(default = "default_offset_x")]
    pub offset_x: i32,
    /// Vertical offset of the popup's top-left from the cursor
    #[serde(default = "default_offset_y")]
    pub offset_y: i32,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            offset_x: default_offset_x(),
            offset_y: default_offset_y(),
            font_family: default_font_family(),
            font_size: default_font_size(),
        }
    }
}
