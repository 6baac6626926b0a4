//! Inference provider trait for Q&A generation

use async_trait::async_trait;

use crate::error::Result;

/// Trait for text completion from a language model
///
/// Implementations:
/// - `OllamaLlm`: Local Ollama server (llama3.2, qwen2.5, etc.)
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Complete `user_content` under `system_prompt`, returning the raw text
    async fn complete(&self, system_prompt: &str, user_content: &str) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
