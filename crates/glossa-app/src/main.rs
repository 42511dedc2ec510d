use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use glossa_core::{CaptureMatchPipeline, Corpus, PipelineSettings};
use glossa_ocr::{HotkeyRegistration, XcapCapture};
use glossa_ui::SlintOverlay;

mod controller;
mod events;
mod io;
mod settings;
mod state;
mod status;


use crate::controller::{AppController, join_all};
use crate::settings::{CONFIG_FILE, load_config};
use crate::state::AppState;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config(Path::new(CONFIG_FILE))?;

    let corpus = Corpus::load(&config.corpus.path)
        .with_context(|| format!("Failed to load corpus {}", config.corpus.path.display()))?;
    let ocr = glossa_ocr::init_ocr_engine(&config.ocr).context("Failed to initialize OCR engine")?;
    let pipeline = CaptureMatchPipeline::new(
        XcapCapture,
        ocr,
        Arc::new(corpus),
        PipelineSettings {
            capture_width: config.capture.width,
            capture_height: config.capture.height,
        },
    );

    // Hotkeys belong to the thread running the platform event loop
    let hotkey = config
        .trigger
        .hotkey
        .as_deref()
        .map(HotkeyRegistration::register)
        .transpose()?;

    let (overlay, ui_rx) =
        SlintOverlay::channel(config.overlay.offset_x, config.overlay.offset_y);
    let overlay_config = config.overlay.clone();

    let state = Arc::new(AppState::new(
        config,
        Arc::new(pipeline),
        hotkey.as_ref().map(HotkeyRegistration::id),
    ));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start tokio runtime")?;

    let controller = AppController::new(state.clone());
    let tasks = {
        let _guard = runtime.enter();
        controller.spawn_tasks(overlay.clone())
    };

    let cancel = controller.cancel_token();
    runtime.spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    tracing::error!("Failed to listen for ctrl+c: {}", e);
                    return;
                }
                tracing::info!("Shutdown requested");
                cancel.cancel();
            }
            _ = cancel.cancelled() => {}
        }
        overlay.quit();
    });

    tracing::info!("Ready");
    let ui_result = glossa_ui::ui_loop(&overlay_config, ui_rx);

    controller.shutdown();
    runtime.block_on(async {
        if tokio::time::timeout(Duration::from_secs(2), join_all(tasks))
            .await
            .is_err()
        {
            tracing::warn!("Tasks did not stop in time");
        }
    });
    runtime.shutdown_timeout(Duration::from_secs(1));

    state.stats.log_summary();
    drop(hotkey);

    ui_result
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_ansi(atty::is(atty::Stream::Stdout))
        .init();
}
