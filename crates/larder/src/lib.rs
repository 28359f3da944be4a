//! larder: pantry-aware recipe generation with a response cache
//!
//! # Features
//!
//! - **Urgency-aware enrichment** of pantry items by days until expiry
//! - **Content-addressed caching** keyed by a permutation-stable pantry fingerprint
//! - **Read-through gateway** with a 24h TTL and optional miss coalescing
//! - **Defensive normalization** of generator output
//! - **Pluggable stores** (Memory, Redis) and generators (Fake, Gemini)
//! - **Metrics integration**
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use larder::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryStore::with_defaults();
//!     let generator = FakeGenerator::with_response(r#"{"recipes": []}"#);
//!     let service = RecipeService::new(store, generator);
//!
//!     let request = RecipeRequest::new(vec![
//!         PantryItemRaw::new("eggs", 6.0).expires("2024-01-12"),
//!         PantryItemRaw::new("rice", 1.0),
//!     ])
//!     .max_recipes(3);
//!
//!     let outcome = service.handle(&request).await?;
//!     println!("{} recipes ({})", outcome.recipes.len(), outcome.cache.as_str());
//!
//!     Ok(())
//! }
//! ```

pub mod enrich;
pub mod fingerprint;
pub mod gateway;
pub mod generator;
pub mod normalize;
pub mod prompt;
pub mod service;
pub mod urgency;

// Re-export core
pub use larder_core::*;

// Re-export storage
pub use larder_storage::LazyStore;
#[cfg(feature = "memory")]
pub use larder_storage::{MemoryConfig, MemoryStore};
#[cfg(feature = "redis")]
pub use larder_storage::{RedisConfig, RedisStore};

pub use fingerprint::Fingerprint;
pub use gateway::{CacheGateway, Cached, GatewayConfig, GatewayError};
pub use generator::FakeGenerator;
#[cfg(feature = "gemini")]
pub use generator::{GeminiConfig, GeminiGenerator};
pub use prompt::PromptConfig;
pub use service::{Pipeline, RecipeService, ServiceConfig, ServiceError};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        CacheGateway, CacheStatus, Cached, Clock, DocumentStore, FakeGenerator, Fingerprint,
        GatewayConfig, GatewayError, GenerationError, ManualClock, PantryItemEnriched,
        PantryItemRaw, Pipeline, PromptConfig, Recipe, RecipeGenerator, RecipeOutcome,
        RecipeRequest, RecipeResponse, RecipeService, ServiceConfig, ServiceError, SystemClock,
    };

    #[cfg(feature = "memory")]
    pub use crate::{MemoryConfig, MemoryStore};

    #[cfg(feature = "redis")]
    pub use crate::{RedisConfig, RedisStore};

    #[cfg(feature = "gemini")]
    pub use crate::{GeminiConfig, GeminiGenerator};
}
