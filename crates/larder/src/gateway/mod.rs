//! Read-through recipe cache keyed by pantry fingerprint

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::TimeDelta;
use thiserror::Error;
use tracing::{debug, info, warn};

use larder_core::{
    CacheMetrics, CacheOperation, CacheStatus, Clock, DocumentStore, GenerationError,
    NoopMetrics, RecipeCacheEntry, RecipeResponse, StoreError, SystemClock,
};

use crate::fingerprint::Fingerprint;
use crate::prompt::PROMPT_VERSION;

mod coalescer;
use coalescer::Coalescer;

/// Default freshness window of a cached response
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration for CacheGateway
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// How long a written entry is served
    pub ttl: Duration,
    /// Share one in-flight generation among concurrent misses on a fingerprint
    pub coalesce_misses: bool,
    /// Prompt/schema version recorded on written entries
    pub version: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            coalesce_misses: false,
            version: PROMPT_VERSION,
        }
    }
}

impl GatewayConfig {
    /// Create config with specific TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            ..Default::default()
        }
    }

    /// Set the TTL
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Enable miss coalescing
    pub fn coalesce_misses(mut self, enabled: bool) -> Self {
        self.coalesce_misses = enabled;
        self
    }

    /// Set the version recorded on written entries
    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }
}

/// Errors surfaced by the gateway
#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("gateway error: {0}")]
    Internal(String),
}

/// A response together with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Cached {
    pub response: RecipeResponse,
    pub status: CacheStatus,
}

impl Cached {
    /// Response served from a fresh entry
    pub fn hit(response: RecipeResponse) -> Self {
        Self {
            response,
            status: CacheStatus::Hit,
        }
    }

    /// Response produced by the generator
    pub fn miss(response: RecipeResponse) -> Self {
        Self {
            response,
            status: CacheStatus::Miss,
        }
    }
}

/// Read-through cache in front of a recipe generator
///
/// Generic over:
/// - `S`: The document store (Memory, Redis, Lazy)
/// - `M`: The metrics collector
///
/// Entries are never deleted. A stale or undecodable entry is treated as a
/// miss and overwritten by the next successful generation.
pub struct CacheGateway<S, M = NoopMetrics>
where
    S: DocumentStore,
    M: CacheMetrics,
{
    store: Arc<S>,
    metrics: Arc<M>,
    clock: Arc<dyn Clock>,
    config: GatewayConfig,
    coalescer: Coalescer,
}

impl<S: DocumentStore, M: CacheMetrics> Clone for CacheGateway<S, M> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            metrics: Arc::clone(&self.metrics),
            clock: Arc::clone(&self.clock),
            config: self.config.clone(),
            coalescer: self.coalescer.clone(),
        }
    }
}

// Constructors for default metrics
impl<S: DocumentStore> CacheGateway<S, NoopMetrics> {
    /// Create a gateway with the default config and no metrics
    pub fn new(store: S) -> Self {
        Self::with_config(store, GatewayConfig::default())
    }

    /// Create with custom config
    pub fn with_config(store: S, config: GatewayConfig) -> Self {
        Self::with_metrics(store, NoopMetrics, config)
    }
}

impl<S, M> CacheGateway<S, M>
where
    S: DocumentStore,
    M: CacheMetrics,
{
    /// Create a gateway with custom metrics
    pub fn with_metrics(store: S, metrics: M, config: GatewayConfig) -> Self {
        Self {
            store: Arc::new(store),
            metrics: Arc::new(metrics),
            clock: Arc::new(SystemClock),
            config,
            coalescer: Coalescer::new(),
        }
    }

    /// Replace the clock used for freshness checks and timestamps
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the gateway config
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Get the response for `fingerprint`, generating it on a miss
    ///
    /// A fresh entry is returned as `HIT` without calling `generate`.
    /// Otherwise `generate` runs once; its result is written with the
    /// configured TTL and returned as `MISS`. A failed generation writes
    /// nothing.
    pub async fn get_or_generate<F, Fut>(
        &self,
        fingerprint: &Fingerprint,
        model: &str,
        generate: F,
    ) -> Result<Cached, GatewayError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<RecipeResponse, GenerationError>>,
    {
        if self.config.coalesce_misses {
            self.coalescer
                .do_request(fingerprint.as_str(), || {
                    self.lookup_or_generate(fingerprint, model, generate)
                })
                .await
        } else {
            self.lookup_or_generate(fingerprint, model, generate).await
        }
    }

    async fn lookup_or_generate<F, Fut>(
        &self,
        fingerprint: &Fingerprint,
        model: &str,
        generate: F,
    ) -> Result<Cached, GatewayError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<RecipeResponse, GenerationError>>,
    {
        if let Some(response) = self.lookup(fingerprint).await? {
            return Ok(Cached::hit(response));
        }

        // Reject a bad TTL before calling the generator
        let ttl = self.entry_ttl()?;

        let start = Instant::now();
        let generated = generate().await;
        self.metrics
            .record_latency(CacheOperation::Generate, start.elapsed());

        let response = match generated {
            Ok(response) => response,
            Err(e) => {
                self.metrics.record_generation_failure(fingerprint.as_str());
                warn!(target: "larder", fingerprint = %fingerprint, error = %e, "recipe generation failed");
                return Err(e.into());
            }
        };

        self.write(fingerprint, model, &response, ttl).await?;
        info!(
            target: "larder",
            fingerprint = %fingerprint,
            recipes = response.len(),
            "cached generated recipes"
        );

        Ok(Cached::miss(response))
    }

    /// Get the fresh response stored for `fingerprint`, if any
    ///
    /// Records a hit, a miss, or a stale read. Undecodable documents are
    /// logged and reported as a miss.
    pub async fn lookup(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<RecipeResponse>, GatewayError> {
        let start = Instant::now();
        let document = self.store.get(fingerprint.as_str()).await;
        self.metrics
            .record_latency(CacheOperation::Lookup, start.elapsed());

        let Some(document) = document? else {
            self.metrics.record_miss(fingerprint.as_str());
            debug!(target: "larder", fingerprint = %fingerprint, "no cached entry");
            return Ok(None);
        };

        let now = self.clock.now();
        match RecipeCacheEntry::from_document(document) {
            Ok(entry) if entry.is_fresh(now) => {
                self.metrics.record_hit(fingerprint.as_str());
                debug!(
                    target: "larder",
                    fingerprint = %fingerprint,
                    model = %entry.model,
                    age_secs = entry.age(now).num_seconds(),
                    ttl_remaining_secs = entry.ttl_remaining(now).map_or(0, |t| t.num_seconds()),
                    "cache hit"
                );
                Ok(Some(entry.response))
            }
            Ok(entry) => {
                self.metrics.record_stale(fingerprint.as_str());
                debug!(
                    target: "larder",
                    fingerprint = %fingerprint,
                    expired_at = %entry.expires_at,
                    "cached entry expired"
                );
                Ok(None)
            }
            Err(e) => {
                self.metrics.record_miss(fingerprint.as_str());
                warn!(
                    target: "larder",
                    fingerprint = %fingerprint,
                    error = %e,
                    "discarding undecodable cache entry"
                );
                Ok(None)
            }
        }
    }

    /// Read the stored entry for `fingerprint` regardless of freshness
    pub async fn entry(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<RecipeCacheEntry>, GatewayError> {
        match self.store.get(fingerprint.as_str()).await? {
            Some(document) => Ok(Some(RecipeCacheEntry::from_document(document)?)),
            None => Ok(None),
        }
    }

    /// Configured TTL as a positive `TimeDelta`
    fn entry_ttl(&self) -> Result<TimeDelta, GatewayError> {
        match TimeDelta::from_std(self.config.ttl) {
            Ok(ttl) if ttl > TimeDelta::zero() => Ok(ttl),
            Ok(_) => Err(GatewayError::Internal("ttl must be positive".to_string())),
            Err(e) => Err(GatewayError::Internal(format!("ttl out of range: {e}"))),
        }
    }

    async fn write(
        &self,
        fingerprint: &Fingerprint,
        model: &str,
        response: &RecipeResponse,
        ttl: TimeDelta,
    ) -> Result<(), GatewayError> {
        let now = self.clock.now();
        let entry = RecipeCacheEntry::new(
            fingerprint.as_str(),
            response.clone(),
            model,
            self.config.version,
            now,
            ttl,
        )
        .ok_or_else(|| {
            GatewayError::Internal(format!("ttl {ttl} overflows the expiry time from {now}"))
        })?;
        let document = entry.to_document()?;

        let start = Instant::now();
        let written = self.store.upsert(fingerprint.as_str(), document).await;
        self.metrics
            .record_latency(CacheOperation::Store, start.elapsed());

        Ok(written?)
    }
}
