//! Document store trait

use async_trait::async_trait;
use std::sync::Arc;

use crate::{Result, StoreError, StoreStats};

/// A stored document: a JSON object with top-level fields
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Key-value store of JSON documents
///
/// Implementations include the in-memory store and Redis. The store knows
/// nothing about freshness; callers compare the timestamps inside the
/// document against their own clock.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Get the document stored under `key`
    async fn get(&self, key: &str) -> Result<Option<Document>>;

    /// Write `document` under `key` with merge semantics
    ///
    /// Top-level fields of `document` replace the same fields of any
    /// existing document; fields not present in `document` are kept.
    async fn upsert(&self, key: &str, document: Document) -> Result<()>;

    /// Get the number of documents
    async fn len(&self) -> Result<usize>;

    /// Check if the store is empty
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Get store statistics
    async fn stats(&self) -> Result<StoreStats> {
        Err(StoreError::Internal("stats not supported".to_string()))
    }
}

#[async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<Document>> {
        (**self).get(key).await
    }

    async fn upsert(&self, key: &str, document: Document) -> Result<()> {
        (**self).upsert(key, document).await
    }

    async fn len(&self) -> Result<usize> {
        (**self).len().await
    }

    async fn is_empty(&self) -> Result<bool> {
        (**self).is_empty().await
    }

    async fn stats(&self) -> Result<StoreStats> {
        (**self).stats().await
    }
}
