use serde::{Deserialize, Serialize};

fn default_width() -> u32 {
    2000
}

fn default_height() -> u32 {
    100
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_language() -> String {
    "en".to_string()
}

fn default_tesseract_language() -> String {
    "eng".to_string()
}

/// Size of the region grabbed around the cursor on each trigger
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CaptureConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Upper bound for capture + OCR of a single trigger
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OcrConfig {
    /// BCP-47 tag for Windows.Media.Ocr
    #[serde(default = "default_language")]
    pub language: String,
    /// Language pack name passed to tesseract on other platforms
    #[serde(default = "default_tesseract_language")]
    pub tesseract_language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            tesseract_language: default_tesseract_language(),
        }
    }
}
