use async_trait::async_trait;
use bb8::{Pool, PooledConnection};
use bb8_redis::RedisConnectionManager;
use parking_lot::RwLock as SyncRwLock;
use redis::Value;
use std::collections::HashMap;
use std::sync::Arc;

use larder_core::{Document, DocumentStore, Result, StoreError, StoreStats};

use super::config::RedisConfig;

/// Redis store implementation
///
/// Each document is a Redis hash: one field per top-level document field,
/// holding that field's JSON encoding. `HSET` only touches the fields it is
/// given, which gives upserts merge semantics.
#[derive(Clone)]
pub struct RedisStore {
    pool: Pool<RedisConnectionManager>,
    config: RedisConfig,
    stats: Arc<SyncRwLock<StoreStats>>,
}

impl RedisStore {
    /// Create a new Redis store
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let manager = RedisConnectionManager::new(config.url.as_str())
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self {
            pool,
            config,
            stats: Arc::new(SyncRwLock::new(StoreStats::default())),
        })
    }

    /// Get prefix for a key
    fn prefixed_key(&self, key: &str) -> String {
        match &self.config.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }

    /// Set holding every document key
    fn index_key(&self) -> String {
        match &self.config.key_prefix {
            Some(prefix) => format!("{}:__index__", prefix),
            None => "__index__".to_string(),
        }
    }

    /// Get connection from pool
    async fn get_connection(&self) -> Result<PooledConnection<'_, RedisConnectionManager>> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))
    }
}

/// Rebuild a document from hash fields
fn decode_fields(fields: HashMap<String, String>) -> Result<Document> {
    let mut document = Document::new();
    for (field, raw) in fields {
        let value = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Deserialization(format!("field {field}: {e}")))?;
        document.insert(field, value);
    }
    Ok(document)
}

/// Encode document fields for `HSET`
fn encode_fields(document: &Document) -> Result<Vec<(String, String)>> {
    document
        .iter()
        .map(|(field, value)| {
            serde_json::to_string(value)
                .map(|raw| (field.clone(), raw))
                .map_err(|e| StoreError::Serialization(e.to_string()))
        })
        .collect()
}

#[async_trait]
impl DocumentStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Document>> {
        let mut conn = self.get_connection().await?;
        let prefixed = self.prefixed_key(key);

        let fields: HashMap<String, String> = redis::cmd("HGETALL")
            .arg(&prefixed)
            .query_async(&mut *conn)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if fields.is_empty() {
            self.stats.write().misses += 1;
            return Ok(None);
        }

        self.stats.write().hits += 1;
        decode_fields(fields).map(Some)
    }

    async fn upsert(&self, key: &str, document: Document) -> Result<()> {
        if document.is_empty() {
            return Ok(());
        }

        let mut conn = self.get_connection().await?;
        let prefixed = self.prefixed_key(key);
        let fields = encode_fields(&document)?;

        // Use pipeline for atomicity (write fields + update index)
        let mut pipe = redis::pipe();
        pipe.atomic();
        pipe.cmd("HSET").arg(&prefixed).arg(&fields);
        pipe.cmd("SADD").arg(self.index_key()).arg(key);

        let results: Vec<Value> = pipe
            .query_async(&mut *conn)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        // SADD answers 0 when the key was already indexed
        let replaced = matches!(results.get(1), Some(Value::Int(0)));

        let mut stats = self.stats.write();
        stats.writes += 1;
        if replaced {
            stats.overwrites += 1;
        }
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        let mut conn = self.get_connection().await?;
        redis::cmd("SCARD")
            .arg(self.index_key())
            .query_async(&mut *conn)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn stats(&self) -> Result<StoreStats> {
        let size = self.len().await?;
        let mut stats = self.stats.read().clone();
        stats.size = size;
        Ok(stats)
    }
}
