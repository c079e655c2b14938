//! Service counters

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    checks_started: AtomicU64,
    attempts_failed: AtomicU64,
    fallbacks_attempted: AtomicU64,
    store_lookups: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check_started(&self) {
        self.checks_started.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "checks_started", "Metric incremented");
    }

    pub fn attempt_failed(&self) {
        self.attempts_failed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "attempts_failed", "Metric incremented");
    }

    pub fn fallback_attempted(&self) {
        self.fallbacks_attempted.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "fallbacks_attempted", "Metric incremented");
    }

    pub fn store_lookup(&self) {
        self.store_lookups.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "store_lookups", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            checks_started: self.checks_started.load(Ordering::Relaxed),
            attempts_failed: self.attempts_failed.load(Ordering::Relaxed),
            fallbacks_attempted: self.fallbacks_attempted.load(Ordering::Relaxed),
            store_lookups: self.store_lookups.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub checks_started: u64,
    pub attempts_failed: u64,
    pub fallbacks_attempted: u64,
    pub store_lookups: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let metrics = Metrics::new();
        metrics.check_started();
        metrics.check_started();
        metrics.store_lookup();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.checks_started, 2);
        assert_eq!(snapshot.store_lookups, 1);
        assert_eq!(snapshot.attempts_failed, 0);
        assert_eq!(snapshot.fallbacks_attempted, 0);
    }
}
