//! Scripted generator for tests and demos.
//!
//! Returns queued responses first, then the default response. Every call
//! is counted and its prompt recorded, so tests can assert on whether (and
//! with what) the generator was invoked.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use larder_core::{GenerationError, RecipeGenerator};

type Reply = Result<String, GenerationError>;

#[derive(Debug)]
struct FakeState {
    queue: Mutex<VecDeque<Reply>>,
    default_reply: Mutex<Option<Reply>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

/// A fake recipe generator
///
/// Cloning creates a new handle to the SAME script and call log.
#[derive(Debug, Clone)]
pub struct FakeGenerator {
    state: Arc<FakeState>,
    model: String,
    delay: Option<Duration>,
}

impl Default for FakeGenerator {
    fn default() -> Self {
        Self::with_response(r#"{"recipes": []}"#)
    }
}

impl FakeGenerator {
    /// Create a generator with nothing scripted; every call fails
    pub fn new() -> Self {
        Self {
            state: Arc::new(FakeState {
                queue: Mutex::new(VecDeque::new()),
                default_reply: Mutex::new(None),
                prompts: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }),
            model: "fake-model".to_string(),
            delay: None,
        }
    }

    /// Create a generator that always answers with `text`
    pub fn with_response(text: impl Into<String>) -> Self {
        let generator = Self::new();
        generator.set_default(Ok(text.into()));
        generator
    }

    /// Create a generator that always answers with `value` serialized
    pub fn with_json(value: Value) -> Self {
        Self::with_response(value.to_string())
    }

    /// Create a generator that always fails with `error`
    pub fn failing(error: GenerationError) -> Self {
        let generator = Self::new();
        generator.set_default(Err(error));
        generator
    }

    /// Report a different model name
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sleep before answering each call
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replace the answer used once the queue is drained
    pub fn set_default(&self, reply: Reply) {
        *self.state.default_reply.lock() = Some(reply);
    }

    /// Queue a one-shot answer
    pub fn push_response(&self, text: impl Into<String>) {
        self.state.queue.lock().push_back(Ok(text.into()));
    }

    /// Queue a one-shot failure
    pub fn push_error(&self, error: GenerationError) {
        self.state.queue.lock().push_back(Err(error));
    }

    /// Number of calls so far
    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    /// All prompts received, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.state.prompts.lock().clone()
    }

    /// The most recent prompt
    pub fn last_prompt(&self) -> Option<String> {
        self.state.prompts.lock().last().cloned()
    }

    fn next_reply(&self) -> Reply {
        if let Some(reply) = self.state.queue.lock().pop_front() {
            return reply;
        }
        match &*self.state.default_reply.lock() {
            Some(reply) => reply.clone(),
            None => Err(GenerationError::NotConfigured(
                "FakeGenerator has no response scripted".to_string(),
            )),
        }
    }
}

#[async_trait]
impl RecipeGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.state.calls.fetch_add(1, Ordering::SeqCst);
        self.state.prompts.lock().push(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.next_reply()
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_default_response() {
        let generator = FakeGenerator::with_json(json!({ "recipes": [] }));
        assert_eq!(generator.generate("p").await.unwrap(), r#"{"recipes":[]}"#);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_queue_before_default() {
        let generator = FakeGenerator::with_response("default");
        generator.push_response("first");
        generator.push_error(GenerationError::Timeout);

        assert_eq!(generator.generate("a").await.unwrap(), "first");
        assert!(matches!(
            generator.generate("b").await,
            Err(GenerationError::Timeout)
        ));
        assert_eq!(generator.generate("c").await.unwrap(), "default");
        assert_eq!(generator.prompts(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_unscripted_fails() {
        let generator = FakeGenerator::new();
        assert!(matches!(
            generator.generate("p").await,
            Err(GenerationError::NotConfigured(_))
        ));
    }

    #[tokio::test]
    async fn test_clones_share_log() {
        let generator = FakeGenerator::default().model("test-model");
        let handle = generator.clone();
        handle.generate("hello").await.unwrap();

        assert_eq!(generator.calls(), 1);
        assert_eq!(generator.last_prompt().as_deref(), Some("hello"));
        assert_eq!(generator.model_name(), "test-model");
        assert_eq!(generator.provider_name(), "fake");
    }
}
