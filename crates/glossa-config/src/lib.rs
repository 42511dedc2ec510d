use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::corpus::{CorpusConfig, MatchingConfig};
use self::ocr::{CaptureConfig, OcrConfig};
use self::overlay::OverlayConfig;
use self::trigger::TriggerConfig;

pub mod corpus;
pub mod ocr;
pub mod overlay;
pub mod trigger;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub capture: CaptureConfig,
    pub ocr: OcrConfig,
    pub trigger: TriggerConfig,
    pub overlay: OverlayConfig,
    pub matching: MatchingConfig,
}

impl Config {
    /// Read a JSON config file; missing sections fall back to defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let reader = BufReader::new(File::open(path)?);
        let config: Config = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capture.width == 0 || self.capture.height == 0 {
            return Err(ConfigError::Invalid {
                field: "capture",
                reason: format!(
                    "region must be non-empty, got {}x{}",
                    self.capture.width, self.capture.height
                ),
            });
        }

        if self.capture.timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "capture.timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.trigger.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "trigger.poll_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.trigger.mouse_button.is_none() && self.trigger.hotkey.is_none() {
            return Err(ConfigError::Invalid {
                field: "trigger",
                reason: "either mouse_button or hotkey must be set".to_string(),
            });
        }

        if !(self.overlay.font_size > 0.0) {
            return Err(ConfigError::Invalid {
                field: "overlay.font_size",
                reason: format!("must be positive, got {}", self.overlay.font_size),
            });
        }

        if let Some(threshold) = self.matching.min_similarity
            && !(0.0..=1.0).contains(&threshold)
        {
            return Err(ConfigError::Invalid {
                field: "matching.min_similarity",
                reason: format!("must be within [0, 1], got {threshold}"),
            });
        }

        Ok(())
    }
}
