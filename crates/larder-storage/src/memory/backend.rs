//! In-memory document store using DashMap

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::RwLock;
use std::sync::Arc;

use larder_core::{Document, DocumentStore, Result, StoreStats};

/// Configuration for the memory store
#[derive(Debug, Clone)]
pub struct MemoryConfig {
    /// Number of documents to reserve space for up front
    pub initial_capacity: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 1_024,
        }
    }
}

impl MemoryConfig {
    /// Create config with specific initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            initial_capacity: capacity,
        }
    }
}

/// Internal statistics tracking
#[derive(Debug, Default)]
struct MemoryStats {
    hits: u64,
    misses: u64,
    writes: u64,
    overwrites: u64,
}

/// In-memory document store
///
/// Uses `DashMap` for concurrent access. Documents are never evicted.
/// Cloning creates a new handle to the SAME underlying store.
#[derive(Clone)]
pub struct MemoryStore {
    /// Main data store
    data: Arc<DashMap<String, Document>>,
    /// Statistics
    stats: Arc<RwLock<MemoryStats>>,
}

impl MemoryStore {
    /// Create a new memory store
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            data: Arc::new(DashMap::with_capacity(config.initial_capacity)),
            stats: Arc::new(RwLock::new(MemoryStats::default())),
        }
    }

    /// Create with default configuration
    pub fn with_defaults() -> Self {
        Self::new(MemoryConfig::default())
    }

    /// Keys of all stored documents, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.data.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Remove every document
    pub fn clear(&self) {
        self.data.clear();
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Document>> {
        match self.data.get(key) {
            Some(document) => {
                self.stats.write().hits += 1;
                Ok(Some(document.clone()))
            }
            None => {
                self.stats.write().misses += 1;
                Ok(None)
            }
        }
    }

    async fn upsert(&self, key: &str, document: Document) -> Result<()> {
        let replaced = match self.data.entry(key.to_string()) {
            Entry::Occupied(mut existing) => {
                existing.get_mut().extend(document);
                true
            }
            Entry::Vacant(vacant) => {
                vacant.insert(document);
                false
            }
        };

        let mut stats = self.stats.write();
        stats.writes += 1;
        if replaced {
            stats.overwrites += 1;
        }
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.data.len())
    }

    async fn stats(&self) -> Result<StoreStats> {
        let stats = self.stats.read();
        Ok(StoreStats {
            hits: stats.hits,
            misses: stats.misses,
            writes: stats.writes,
            overwrites: stats.overwrites,
            size: self.data.len(),
        })
    }
}
