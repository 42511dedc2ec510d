use std::sync::atomic::{AtomicU64, Ordering};

/// Capture counters, shared between the controller and capture tasks
#[derive(Debug, Default)]
pub struct CaptureStats {
    captures: AtomicU64,
    matches: AtomicU64,
    misses: AtomicU64,
    below_threshold: AtomicU64,
    timeouts: AtomicU64,
    failures: AtomicU64,
    dropped_triggers: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub captures: u64,
    pub matches: u64,
    pub misses: u64,
    pub below_threshold: u64,
    pub timeouts: u64,
    pub failures: u64,
    pub dropped_triggers: u64,
}

impl CaptureStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_capture(&self) {
        self.captures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_match(&self) {
        self.matches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_below_threshold(&self) {
        self.below_threshold.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_timeout(&self) {
        self.timeouts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped_trigger(&self) {
        self.dropped_triggers.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            captures: self.captures.load(Ordering::Relaxed),
            matches: self.matches.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            below_threshold: self.below_threshold.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            dropped_triggers: self.dropped_triggers.load(Ordering::Relaxed),
        }
    }

    pub fn log_summary(&self) {
        let s = self.snapshot();
        tracing::info!(
            "Captures: {} (matched {}, no match {}, below threshold {}, timed out {}, failed {}), dropped triggers: {}",
            s.captures,
            s.matches,
            s.misses,
            s.below_threshold,
            s.timeouts,
            s.failures,
            s.dropped_triggers
        );
    }
}
