//! Metrics trait for cache observability

use std::sync::Arc;
use std::time::Duration;

/// Gateway operation for latency tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheOperation {
    /// Store read
    Lookup,
    /// Generator call
    Generate,
    /// Store write
    Store,
}

impl CacheOperation {
    /// Get operation as string label
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheOperation::Lookup => "lookup",
            CacheOperation::Generate => "generate",
            CacheOperation::Store => "store",
        }
    }
}

/// Trait for cache metrics/observability
///
/// Implement this to integrate with your metrics system (Prometheus, StatsD, etc.)
pub trait CacheMetrics: Send + Sync + 'static {
    /// Record a fresh cache hit
    fn record_hit(&self, fingerprint: &str);

    /// Record a cache miss (no entry stored)
    fn record_miss(&self, fingerprint: &str);

    /// Record an entry found past its expiry
    fn record_stale(&self, fingerprint: &str);

    /// Record a failed generator call
    fn record_generation_failure(&self, fingerprint: &str);

    /// Record operation latency
    fn record_latency(&self, operation: CacheOperation, duration: Duration);
}

/// No-op metrics implementation (default)
///
/// Zero overhead when metrics are not needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl CacheMetrics for NoopMetrics {
    #[inline]
    fn record_hit(&self, _fingerprint: &str) {}

    #[inline]
    fn record_miss(&self, _fingerprint: &str) {}

    #[inline]
    fn record_stale(&self, _fingerprint: &str) {}

    #[inline]
    fn record_generation_failure(&self, _fingerprint: &str) {}

    #[inline]
    fn record_latency(&self, _operation: CacheOperation, _duration: Duration) {}
}

impl<T: CacheMetrics + ?Sized> CacheMetrics for Arc<T> {
    fn record_hit(&self, fingerprint: &str) {
        (**self).record_hit(fingerprint)
    }

    fn record_miss(&self, fingerprint: &str) {
        (**self).record_miss(fingerprint)
    }

    fn record_stale(&self, fingerprint: &str) {
        (**self).record_stale(fingerprint)
    }

    fn record_generation_failure(&self, fingerprint: &str) {
        (**self).record_generation_failure(fingerprint)
    }

    fn record_latency(&self, operation: CacheOperation, duration: Duration) {
        (**self).record_latency(operation, duration)
    }
}

/// Metrics adapter using the `metrics` crate
///
/// Integrates with Prometheus, StatsD, and other exporters via the `metrics` ecosystem.
///
/// # Example
/// ```ignore
/// use larder_core::MetricsCrateAdapter;
///
/// // Set up a metrics recorder (e.g., prometheus_exporter)
/// // metrics::set_global_recorder(recorder);
///
/// let metrics = MetricsCrateAdapter::new("larder");
/// // Emits: larder_cache_hits_total, larder_cache_misses_total, etc.
/// ```
#[cfg(feature = "metrics")]
#[derive(Debug, Clone)]
pub struct MetricsCrateAdapter {
    prefix: String,
}

#[cfg(feature = "metrics")]
impl MetricsCrateAdapter {
    /// Create a new adapter with the given metric name prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn metric_name(&self, name: &str) -> String {
        format!("{}_{}", self.prefix, name)
    }
}

#[cfg(feature = "metrics")]
impl Default for MetricsCrateAdapter {
    fn default() -> Self {
        Self::new("larder")
    }
}

#[cfg(feature = "metrics")]
impl CacheMetrics for MetricsCrateAdapter {
    fn record_hit(&self, _fingerprint: &str) {
        metrics::counter!(self.metric_name("cache_hits_total")).increment(1);
    }

    fn record_miss(&self, _fingerprint: &str) {
        metrics::counter!(self.metric_name("cache_misses_total"), "reason" => "absent")
            .increment(1);
    }

    fn record_stale(&self, _fingerprint: &str) {
        metrics::counter!(self.metric_name("cache_misses_total"), "reason" => "stale")
            .increment(1);
    }

    fn record_generation_failure(&self, _fingerprint: &str) {
        metrics::counter!(self.metric_name("generation_failures_total")).increment(1);
    }

    fn record_latency(&self, operation: CacheOperation, duration: Duration) {
        metrics::histogram!(
            self.metric_name("operation_duration_seconds"),
            "operation" => operation.as_str()
        )
        .record(duration.as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_as_str() {
        assert_eq!(CacheOperation::Lookup.as_str(), "lookup");
        assert_eq!(CacheOperation::Generate.as_str(), "generate");
        assert_eq!(CacheOperation::Store.as_str(), "store");
    }

    #[test]
    fn test_noop_metrics() {
        let metrics = NoopMetrics;
        // Just verify these don't panic
        metrics.record_hit("fp");
        metrics.record_miss("fp");
        metrics.record_stale("fp");
        metrics.record_latency(CacheOperation::Lookup, Duration::from_millis(1));
    }
}
