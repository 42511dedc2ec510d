use serde::{Deserialize, Serialize};

use crate::geometry::{Quad, ScreenPoint};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Raw press/release edge from the input listener
    Input(InputEvent),
    /// A capture started by a trigger has resolved
    CaptureFinished {
        outcome: Option<MatchResult>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Mouse {
        button: MouseButton,
        pressed: bool,
        position: ScreenPoint,
    },
    Hotkey {
        id: u32,
        pressed: bool,
        position: ScreenPoint,
    },
}

impl InputEvent {
    pub fn position(&self) -> ScreenPoint {
        match self {
            InputEvent::Mouse { position, .. } | InputEvent::Hotkey { position, .. } => *position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    X1,
    X2,
    Other(u8),
}

/// One OCR-detected text region, in the captured image's coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct OcrToken {
    pub quad: Quad,
    pub text: String,
    pub confidence: f32,
}

/// RGBA pixels grabbed from the screen
#[derive(Debug, Clone)]
pub struct CapturedImage {
    /// Absolute screen position of pixel (0, 0)
    pub origin: ScreenPoint,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub matched_index: usize,
    /// Cosine similarity in [0, 1]
    pub similarity: f32,
    pub source_text: String,
    pub translated_text: String,
}
