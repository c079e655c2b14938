//! Progress notifications emitted while a check runs

use std::sync::Arc;
use tracing::{info, warn};

use super::models::{Platform, RequestLog};
use crate::observability::Metrics;

/// Receives per-attempt events from a running check.
///
/// The discovery core never talks to a presentation layer directly; whoever
/// drives a check decides what to do with these events.
pub trait DiscoveryReporter: Send + Sync {
    /// Called after every fetch attempt, successful or not
    fn attempt_finished(&self, platform: Platform, log: &RequestLog);

    /// Called before the legacy Apple location is tried
    fn fallback_started(&self, _url: &str) {}
}

/// Logs attempts through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl DiscoveryReporter for TracingReporter {
    fn attempt_finished(&self, platform: Platform, log: &RequestLog) {
        if log.success {
            info!(
                %platform,
                url = %log.url,
                status = log.status,
                duration_ms = log.duration,
                "Manifest fetched"
            );
        } else {
            let reason = log
                .failure
                .map(|r| r.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            warn!(
                %platform,
                url = %log.url,
                status = log.status,
                duration_ms = log.duration,
                %reason,
                error = log.error.as_deref().unwrap_or(""),
                "Manifest fetch failed"
            );
        }
    }

    fn fallback_started(&self, url: &str) {
        info!(url, "Trying legacy apple-app-site-association location");
    }
}

/// Logs like [`TracingReporter`] and also feeds the service counters
#[derive(Debug, Clone)]
pub struct MetricsReporter {
    metrics: Arc<Metrics>,
}

impl MetricsReporter {
    pub fn new(metrics: Arc<Metrics>) -> Self {
        Self { metrics }
    }
}

impl DiscoveryReporter for MetricsReporter {
    fn attempt_finished(&self, platform: Platform, log: &RequestLog) {
        if !log.success {
            self.metrics.attempt_failed();
        }
        TracingReporter.attempt_finished(platform, log);
    }

    fn fallback_started(&self, url: &str) {
        self.metrics.fallback_attempted();
        TracingReporter.fallback_started(url);
    }
}
