//! Core types for pantry, recipe, and cache data

mod entry;
mod pantry;
mod recipe;
mod request;
mod stats;

pub use entry::RecipeCacheEntry;
pub use pantry::{PantryItemEnriched, PantryItemRaw, UrgencyBucket};
pub use recipe::{CacheStatus, Difficulty, Recipe, RecipeOutcome, RecipeResponse};
pub use request::{
    RecipeRequest, RequestOptions, DEFAULT_DIET, DEFAULT_MAX_RECIPES, DEFAULT_MAX_TIME_MINUTES,
};
pub use stats::StoreStats;
