//! Recipe generator trait

use async_trait::async_trait;
use std::sync::Arc;

use crate::GenerationError;

/// A generative model that turns a prompt into JSON text
///
/// Implementations make the remote call and return the model's raw text.
/// Parsing the text is the caller's job.
#[async_trait]
pub trait RecipeGenerator: Send + Sync + 'static {
    /// Send a prompt and get the model's text response
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Get the provider name (e.g., "gemini", "fake")
    fn provider_name(&self) -> &'static str;

    /// Get the model name, recorded alongside cached responses
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: RecipeGenerator + ?Sized> RecipeGenerator for Arc<T> {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate(prompt).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
