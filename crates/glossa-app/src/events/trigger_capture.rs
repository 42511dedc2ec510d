use std::sync::Arc;
use std::time::Duration;

use glossa_types::{AppEvent, MatchResult, ScreenPoint};
use kanal::AsyncSender;

use crate::state::AppState;
use crate::status::CaptureStats;

/// Run one capture off the controller and report back with `CaptureFinished`
pub async fn handle_capture_trigger(
    state: Arc<AppState>,
    cursor: ScreenPoint,
    event_tx: AsyncSender<AppEvent>,
) {
    let outcome = run_capture(&state, cursor).await;

    if event_tx
        .send(AppEvent::CaptureFinished { outcome })
        .await
        .is_err()
    {
        tracing::debug!(">>> [CAPTURE] Controller gone, result discarded");
    }
}

/// Capture, OCR and match on a blocking thread, bounded by the configured timeout
///
/// A run that times out keeps the capture slot until its thread returns, so
/// no second run can start next to it.
pub async fn run_capture(state: &AppState, cursor: ScreenPoint) -> Option<MatchResult> {
    let Some(slot) = state.capture_slot.try_take() else {
        tracing::debug!(">>> [CAPTURE] Previous run still executing, trigger dropped");
        state.stats.record_dropped_trigger();
        return None;
    };
    state.stats.record_capture();

    let timeout = Duration::from_millis(state.config.capture.timeout_ms);
    let matcher = state.matcher.clone();
    let task = tokio::task::spawn_blocking(move || {
        let _slot = slot;
        matcher.try_run(cursor)
    });

    let outcome = match tokio::time::timeout(timeout, task).await {
        Ok(Ok(Ok(outcome))) => outcome,
        Ok(Ok(Err(e))) => {
            tracing::error!(">>> [CAPTURE] Failed: {:#}", e);
            state.stats.record_failure();
            return None;
        }
        Ok(Err(e)) => {
            tracing::error!(">>> [CAPTURE] Task error: {}", e);
            state.stats.record_failure();
            return None;
        }
        Err(_) => {
            tracing::warn!(">>> [CAPTURE] Timed out after {:?}", timeout);
            state.stats.record_timeout();
            return None;
        }
    };

    apply_threshold(outcome, state.config.matching.min_similarity, &state.stats)
}

/// Treat a match scoring under `min_similarity` as no match
pub fn apply_threshold(
    outcome: Option<MatchResult>,
    min_similarity: Option<f32>,
    stats: &CaptureStats,
) -> Option<MatchResult> {
    let Some(result) = outcome else {
        stats.record_miss();
        return None;
    };

    if let Some(threshold) = min_similarity
        && result.similarity < threshold
    {
        tracing::debug!(
            ">>> [CAPTURE] Best match {:.2} below threshold {:.2}",
            result.similarity,
            threshold
        );
        stats.record_below_threshold();
        return None;
    }

    stats.record_match();
    Some(result)
}
