use crate::{CacheMetrics, CacheOperation};
use std::time::Duration;
use tracing::{debug, warn};

/// Metrics adapter that logs events via `tracing`
#[derive(Debug, Clone, Default)]
pub struct TracingMetrics {
    /// Service name/prefix (optional)
    service_name: Option<String>,
}

impl TracingMetrics {
    /// Create new tracing metrics adapter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with service name prefix
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }
}

impl CacheMetrics for TracingMetrics {
    fn record_hit(&self, fingerprint: &str) {
        debug!(
            target: "larder",
            event = "hit",
            fingerprint = %fingerprint,
            service = ?self.service_name,
            "Recipe cache hit"
        );
    }

    fn record_miss(&self, fingerprint: &str) {
        debug!(
            target: "larder",
            event = "miss",
            fingerprint = %fingerprint,
            service = ?self.service_name,
            "Recipe cache miss"
        );
    }

    fn record_stale(&self, fingerprint: &str) {
        debug!(
            target: "larder",
            event = "stale",
            fingerprint = %fingerprint,
            service = ?self.service_name,
            "Recipe cache entry expired"
        );
    }

    fn record_generation_failure(&self, fingerprint: &str) {
        warn!(
            target: "larder",
            event = "generation_failure",
            fingerprint = %fingerprint,
            service = ?self.service_name,
            "Recipe generation failed"
        );
    }

    fn record_latency(&self, operation: CacheOperation, duration: Duration) {
        tracing::trace!(
            target: "larder",
            event = "latency",
            operation = operation.as_str(),
            duration_ms = duration.as_millis() as u64,
            service = ?self.service_name,
            "Gateway operation latency"
        );
    }
}
