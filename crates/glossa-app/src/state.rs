use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use glossa_config::Config;
use glossa_core::{CaptureMatcher, Trigger};

use crate::status::CaptureStats;

pub struct AppState {
    pub config: Config,
    pub matcher: Arc<dyn CaptureMatcher>,
    pub trigger: Trigger,
    pub stats: CaptureStats,
    /// Held while a pipeline run is executing, including one that timed out
    pub capture_slot: CaptureSlot,
}

impl AppState {
    pub fn new(config: Config, matcher: Arc<dyn CaptureMatcher>, hotkey_id: Option<u32>) -> Self {
        let trigger = Trigger {
            mouse_button: config.trigger.mouse_button,
            hotkey_id,
        };

        Self {
            config,
            matcher,
            trigger,
            stats: CaptureStats::new(),
            capture_slot: CaptureSlot::default(),
        }
    }
}

/// At most one pipeline run at a time
#[derive(Debug, Default, Clone)]
pub struct CaptureSlot(Arc<AtomicBool>);

impl CaptureSlot {
    pub fn is_taken(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// `None` while another run still holds the slot
    pub fn try_take(&self) -> Option<CaptureSlotGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| CaptureSlotGuard(self.0.clone()))
    }
}

/// Frees the slot when dropped, i.e. when the blocking run returns
#[derive(Debug)]
pub struct CaptureSlotGuard(Arc<AtomicBool>);

impl Drop for CaptureSlotGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
