//! In-memory document store

mod backend;

pub use backend::{MemoryConfig, MemoryStore};
