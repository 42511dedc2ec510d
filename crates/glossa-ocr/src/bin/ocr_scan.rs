//! Capture around the cursor and dump what OCR sees
//! run with: cargo run -p glossa-ocr --bin ocr_scan

use anyhow::Result;
use device_query::{DeviceQuery, DeviceState};
use glossa_config::Config;
use glossa_core::{ScreenCapture, TextRecognizer, select_nearest};
use glossa_types::{CaptureRegion, ScreenPoint};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let config = Config::default();
    let (x, y) = DeviceState::new().get_mouse().coords;
    let cursor = ScreenPoint::new(x, y);

    let region = CaptureRegion::centered_on(cursor, config.capture.width, config.capture.height);
    tracing::info!("Capturing {:?} around {:?}", region, cursor);

    let start = std::time::Instant::now();
    let image = glossa_ocr::XcapCapture.capture(region)?;
    tracing::info!(
        "{}x{} at {:?} in {:?}",
        image.width,
        image.height,
        image.origin,
        start.elapsed()
    );

    let engine = glossa_ocr::init_ocr_engine(&config.ocr)?;
    let start = std::time::Instant::now();
    let tokens = engine.recognize(&image)?;
    tracing::info!("{} lines in {:?}", tokens.len(), start.elapsed());

    for token in &tokens {
        tracing::info!(
            "  {:?} ({:.2}) centroid {:?}",
            token.text,
            token.confidence,
            token.quad.centroid()
        );
    }

    let local = cursor.relative_to(image.origin);
    match select_nearest(local.x, local.y, &tokens) {
        Some(text) => tracing::info!("Nearest to cursor: {:?}", text),
        None => tracing::info!("No text near cursor"),
    }

    Ok(())
}
