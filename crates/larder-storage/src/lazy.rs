//! Lazily initialised, process-scoped store handle

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::OnceCell;

use larder_core::{Document, DocumentStore, Result, StoreStats};

type InitFuture<S> = Pin<Box<dyn Future<Output = Result<S>> + Send>>;
type InitFn<S> = dyn Fn() -> InitFuture<S> + Send + Sync;

/// A store that connects on first use
///
/// The first operation runs `init`; every later operation, from any clone,
/// reuses the same handle. A failed initialisation leaves the handle empty
/// and the next operation tries again. Build one per process and inject it
/// wherever a `DocumentStore` is needed.
pub struct LazyStore<S> {
    cell: Arc<OnceCell<S>>,
    init: Arc<InitFn<S>>,
}

impl<S: DocumentStore> LazyStore<S> {
    /// Create a handle that will be initialised by `init`
    pub fn new<F, Fut>(init: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<S>> + Send + 'static,
    {
        Self {
            cell: Arc::new(OnceCell::new()),
            init: Arc::new(move || -> InitFuture<S> { Box::pin(init()) }),
        }
    }

    /// Get the underlying store, initialising it if needed
    pub async fn handle(&self) -> Result<&S> {
        self.cell.get_or_try_init(|| (self.init)()).await
    }

    /// Check whether initialisation has completed
    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}

impl<S> Clone for LazyStore<S> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            init: self.init.clone(),
        }
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for LazyStore<S> {
    async fn get(&self, key: &str) -> Result<Option<Document>> {
        self.handle().await?.get(key).await
    }

    async fn upsert(&self, key: &str, document: Document) -> Result<()> {
        self.handle().await?.upsert(key, document).await
    }

    async fn len(&self) -> Result<usize> {
        self.handle().await?.len().await
    }

    async fn stats(&self) -> Result<StoreStats> {
        self.handle().await?.stats().await
    }
}
