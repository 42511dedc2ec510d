mod capture;
#[cfg(windows)]
mod com;
mod hotkey;
mod input;
#[cfg_attr(windows, allow(dead_code))]
mod lines;
#[cfg(windows)]
mod ocr;
#[cfg(not(windows))]
mod tesseract;

use anyhow::Result;
use glossa_config::ocr::OcrConfig;

pub use capture::XcapCapture;
#[cfg(windows)]
pub use com::ComGuard;
pub use hotkey::{HotkeyRegistration, parse_hotkey};
pub use input::{InputListener, button_edges, button_observable, slot_button};
#[cfg(windows)]
pub use ocr::WindowsOcr;
#[cfg(not(windows))]
pub use tesseract::TesseractOcr;

/// The platform's OCR engine
#[cfg(windows)]
pub type NativeOcr = WindowsOcr;
#[cfg(not(windows))]
pub type NativeOcr = TesseractOcr;

#[cfg(windows)]
pub fn init_ocr_engine(config: &OcrConfig) -> Result<NativeOcr> {
    let engine = WindowsOcr::new(&config.language)?;
    tracing::info!("Windows OCR ready ({})", engine.recognizer_language()?);
    Ok(engine)
}

#[cfg(not(windows))]
pub fn init_ocr_engine(config: &OcrConfig) -> Result<NativeOcr> {
    let engine = TesseractOcr::new(&config.tesseract_language)?;
    tracing::info!("Tesseract OCR ready ({})", config.tesseract_language);
    Ok(engine)
}
