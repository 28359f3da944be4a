//! Request handling: validate, enrich, fingerprint, then serve through the cache

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use larder_core::{
    CacheMetrics, Clock, DocumentStore, GenerationError, NoopMetrics, PantryItemEnriched,
    RecipeGenerator, RecipeOutcome, RecipeRequest, RecipeResponse, RequestOptions, SystemClock,
};

use crate::enrich::{enrich, passthrough};
use crate::fingerprint::fingerprint;
use crate::gateway::{CacheGateway, Cached, GatewayConfig, GatewayError};
use crate::normalize::{coerce_shape, normalize};
use crate::prompt::{PromptConfig, build_prompt};

/// Which optional stages a request runs through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pipeline {
    /// Compute urgency signals; otherwise items pass through without them
    pub enrich: bool,
    /// Sort recipes by match score; the array-shape guard always applies
    pub normalize: bool,
    /// Read and write the response cache
    pub cache: bool,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            enrich: true,
            normalize: true,
            cache: true,
        }
    }
}

impl Pipeline {
    /// Every stage off: generate straight from the raw pantry
    pub fn plain() -> Self {
        Self {
            enrich: false,
            normalize: false,
            cache: false,
        }
    }

    pub fn enrich(mut self, enabled: bool) -> Self {
        self.enrich = enabled;
        self
    }

    pub fn normalize(mut self, enabled: bool) -> Self {
        self.normalize = enabled;
        self
    }

    pub fn cache(mut self, enabled: bool) -> Self {
        self.cache = enabled;
        self
    }
}

/// Configuration for RecipeService
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    pub pipeline: Pipeline,
    pub prompt: PromptConfig,
    pub gateway: GatewayConfig,
}

impl ServiceConfig {
    pub fn pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn prompt(mut self, prompt: PromptConfig) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn gateway(mut self, gateway: GatewayConfig) -> Self {
        self.gateway = gateway;
        self
    }
}

/// Failures reported to the caller of a recipe request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request itself is unusable
    #[error("{0}")]
    InvalidArgument(String),

    /// Generation, parsing, or storage failed
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable error code for transport layers
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::InvalidArgument(_) => "invalid-argument",
            ServiceError::Internal(_) => "internal",
        }
    }
}

impl From<GatewayError> for ServiceError {
    fn from(e: GatewayError) -> Self {
        ServiceError::Internal(e.to_string())
    }
}

impl From<GenerationError> for ServiceError {
    fn from(e: GenerationError) -> Self {
        ServiceError::Internal(e.to_string())
    }
}

/// Turns pantry requests into ranked recipes
///
/// Generic over:
/// - `S`: The document store backing the cache
/// - `G`: The recipe generator
/// - `M`: The metrics collector
///
/// The fingerprint covers the pantry only. Requests with the same pantry
/// but different options share a cache entry for the TTL.
pub struct RecipeService<S, G, M = NoopMetrics>
where
    S: DocumentStore,
    G: RecipeGenerator,
    M: CacheMetrics,
{
    gateway: CacheGateway<S, M>,
    generator: Arc<G>,
    clock: Arc<dyn Clock>,
    config: ServiceConfig,
}

impl<S, G, M> Clone for RecipeService<S, G, M>
where
    S: DocumentStore,
    G: RecipeGenerator,
    M: CacheMetrics,
{
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            generator: Arc::clone(&self.generator),
            clock: Arc::clone(&self.clock),
            config: self.config.clone(),
        }
    }
}

// Constructors for default metrics
impl<S: DocumentStore, G: RecipeGenerator> RecipeService<S, G, NoopMetrics> {
    /// Create a service with every stage on and a 24h cache
    pub fn new(store: S, generator: G) -> Self {
        Self::with_config(store, generator, ServiceConfig::default())
    }

    /// Create with custom config
    pub fn with_config(store: S, generator: G, config: ServiceConfig) -> Self {
        Self::with_metrics(store, generator, NoopMetrics, config)
    }
}

impl<S, G, M> RecipeService<S, G, M>
where
    S: DocumentStore,
    G: RecipeGenerator,
    M: CacheMetrics,
{
    /// Create a service with custom metrics
    pub fn with_metrics(store: S, generator: G, metrics: M, config: ServiceConfig) -> Self {
        let gateway = CacheGateway::with_metrics(store, metrics, config.gateway.clone());
        Self {
            gateway,
            generator: Arc::new(generator),
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Use `clock` for expiry dates and cache freshness
    pub fn clock(mut self, clock: impl Clock) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(clock);
        self.gateway = self.gateway.clock(Arc::clone(&clock));
        self.clock = clock;
        self
    }

    pub fn gateway(&self) -> &CacheGateway<S, M> {
        &self.gateway
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Handle a typed request
    ///
    /// An empty or absent pantry is rejected before any store or generator
    /// call. Every later failure surfaces as `Internal`.
    pub async fn handle(&self, request: &RecipeRequest) -> Result<RecipeOutcome, ServiceError> {
        let pantry = request.pantry_items();
        if pantry.is_empty() {
            return Err(ServiceError::InvalidArgument("Pantry is empty.".to_string()));
        }

        let options = request.options();
        let pipeline = self.config.pipeline;

        let items = if pipeline.enrich {
            enrich(pantry, self.clock.today())
        } else {
            passthrough(pantry)
        };
        let fingerprint = fingerprint(&items);
        debug!(
            target: "larder",
            fingerprint = %fingerprint,
            items = items.len(),
            "fingerprinted pantry"
        );

        let generate = || self.generate(&options, &items);
        let cached = if pipeline.cache {
            self.gateway
                .get_or_generate(&fingerprint, self.generator.model_name(), generate)
                .await?
        } else {
            Cached::miss(generate().await?)
        };

        info!(
            target: "larder",
            fingerprint = %fingerprint,
            cache = cached.status.as_str(),
            recipes = cached.response.len(),
            "recipe request served"
        );

        Ok(RecipeOutcome {
            recipes: cached.response.recipes,
            cache: cached.status,
            fingerprint: fingerprint.into_string(),
        })
    }

    /// Handle a loosely-typed JSON payload
    ///
    /// A `pantry` that is not an array is treated as empty.
    pub async fn handle_json(&self, payload: &Value) -> Result<RecipeOutcome, ServiceError> {
        self.handle(&RecipeRequest::from_value(payload)).await
    }

    async fn generate(
        &self,
        options: &RequestOptions,
        items: &[PantryItemEnriched],
    ) -> Result<RecipeResponse, GenerationError> {
        let prompt = build_prompt(options, items, &self.config.prompt);
        let text = self.generator.generate(&prompt).await?;

        let raw: Value =
            serde_json::from_str(&text).map_err(|e| GenerationError::Parse(e.to_string()))?;

        Ok(if self.config.pipeline.normalize {
            normalize(raw)
        } else {
            coerce_shape(raw)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = ServiceError::InvalidArgument("Pantry is empty.".to_string());
        assert_eq!(err.code(), "invalid-argument");
        assert_eq!(err.to_string(), "Pantry is empty.");

        let err: ServiceError = GatewayError::Internal("x".to_string()).into();
        assert_eq!(err.code(), "internal");
    }

    #[test]
    fn test_pipeline_builders() {
        assert_eq!(
            Pipeline::default(),
            Pipeline {
                enrich: true,
                normalize: true,
                cache: true
            }
        );
        let pipeline = Pipeline::plain().cache(true);
        assert!(pipeline.cache && !pipeline.enrich && !pipeline.normalize);
    }

    #[test]
    fn test_generation_error_message_preserved() {
        let err: ServiceError = GenerationError::Parse("expected value".to_string()).into();
        assert_eq!(
            err,
            ServiceError::Internal("failed to parse generator output: expected value".to_string())
        );
    }
}
