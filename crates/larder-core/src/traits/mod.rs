//! Traits for the external collaborators

mod clock;
mod generator;
mod metrics;
mod store;

#[cfg(feature = "tracing")]
mod tracing;

pub use clock::{Clock, ManualClock, SystemClock};
pub use generator::RecipeGenerator;
pub use metrics::{CacheMetrics, CacheOperation, NoopMetrics};
pub use store::{Document, DocumentStore};

#[cfg(feature = "metrics")]
pub use metrics::MetricsCrateAdapter;

#[cfg(feature = "tracing")]
pub use self::tracing::TracingMetrics;
