//! Metrics collection for the autosave pump

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-pump counters
#[derive(Debug, Default)]
pub struct AutosaveMetrics {
    /// Ticks observed by the ticker
    pub ticks: AtomicU64,

    /// Ticks skipped because a save was still running
    pub ticks_skipped_in_flight: AtomicU64,

    /// Ticks skipped because nothing changed
    pub ticks_skipped_unchanged: AtomicU64,

    pub saves_started: AtomicU64,
    pub saves_succeeded: AtomicU64,
    pub saves_failed: AtomicU64,
}

/// Point-in-time copy of `AutosaveMetrics`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AutosaveMetricsSnapshot {
    pub ticks: u64,
    pub ticks_skipped_in_flight: u64,
    pub ticks_skipped_unchanged: u64,
    pub saves_started: u64,
    pub saves_succeeded: u64,
    pub saves_failed: u64,
}

impl AutosaveMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_tick(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped_in_flight(&self) {
        self.ticks_skipped_in_flight.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped_unchanged(&self) {
        self.ticks_skipped_unchanged.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_save_started(&self) {
        self.saves_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_save_succeeded(&self) {
        self.saves_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_save_failed(&self) {
        self.saves_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Fraction of finished saves that failed
    pub fn failure_rate(&self) -> f64 {
        let failed = self.saves_failed.load(Ordering::Relaxed);
        let finished = failed + self.saves_succeeded.load(Ordering::Relaxed);
        if finished == 0 {
            return 0.0;
        }
        failed as f64 / finished as f64
    }

    pub fn snapshot(&self) -> AutosaveMetricsSnapshot {
        AutosaveMetricsSnapshot {
            ticks: self.ticks.load(Ordering::Relaxed),
            ticks_skipped_in_flight: self.ticks_skipped_in_flight.load(Ordering::Relaxed),
            ticks_skipped_unchanged: self.ticks_skipped_unchanged.load(Ordering::Relaxed),
            saves_started: self.saves_started.load(Ordering::Relaxed),
            saves_succeeded: self.saves_succeeded.load(Ordering::Relaxed),
            saves_failed: self.saves_failed.load(Ordering::Relaxed),
        }
    }
}
