//! larder-core: Core traits and types for the larder recipe service
//!
//! This crate provides the data model shared by every larder crate and the
//! traits for the external collaborators: the document store that holds
//! cached recipe responses, the recipe generator, the clock, and metrics.

mod error;
mod traits;
mod types;

pub use error::{GenerationError, Result, StoreError};
pub use traits::*;
pub use types::*;
