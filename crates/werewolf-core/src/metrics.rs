//! Global atomic counters for agent observability.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event (e.g. when a session finishes).

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Fault;

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Relaxed atomic counters.
pub struct Metrics {
    requests_dispatched: AtomicU64,
    timeouts: AtomicU64,
    handler_faults: AtomicU64,
    hand_offs: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            requests_dispatched: AtomicU64::new(0),
            timeouts: AtomicU64::new(0),
            handler_faults: AtomicU64::new(0),
            hand_offs: AtomicU64::new(0),
        }
    }

    pub fn inc_dispatched(&self) {
        self.requests_dispatched.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "requests_dispatched", "counter incremented");
    }

    /// Count a fault under its category. Post-FINISH rejections are not counted.
    pub fn record_fault(&self, fault: &Fault) {
        match fault {
            Fault::Timeout { .. } => {
                self.timeouts.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(metric = "timeouts", "counter incremented");
            }
            Fault::HandlerError(_) => {
                self.handler_faults.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(metric = "handler_faults", "counter incremented");
            }
            Fault::SessionFinished => {}
        }
    }

    pub fn inc_hand_offs(&self) {
        self.hand_offs.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "hand_offs", "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            event = "metrics.flush",
            requests_dispatched = self.requests_dispatched(),
            timeouts = self.timeouts(),
            handler_faults = self.handler_faults(),
            hand_offs = self.hand_offs(),
        );
    }

    pub fn requests_dispatched(&self) -> u64 {
        self.requests_dispatched.load(Ordering::Relaxed)
    }

    pub fn timeouts(&self) -> u64 {
        self.timeouts.load(Ordering::Relaxed)
    }

    pub fn handler_faults(&self) -> u64 {
        self.handler_faults.load(Ordering::Relaxed)
    }

    pub fn hand_offs(&self) -> u64 {
        self.hand_offs.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.requests_dispatched.store(0, Ordering::Relaxed);
        self.timeouts.store(0, Ordering::Relaxed);
        self.handler_faults.store(0, Ordering::Relaxed);
        self.hand_offs.store(0, Ordering::Relaxed);
    }
}
