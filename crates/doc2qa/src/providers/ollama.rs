//! Ollama-based inference provider
//!
//! Wraps the OllamaClient to implement the provider trait.

use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::error::Result;
use crate::generation::OllamaClient;

use super::llm::InferenceProvider;

/// Ollama LLM provider for Q&A generation
pub struct OllamaLlm {
    client: OllamaClient,
    model: String,
}

impl OllamaLlm {
    /// Create a new Ollama LLM provider
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: OllamaClient::new(config),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl InferenceProvider for OllamaLlm {
    async fn complete(&self, system_prompt: &str, user_content: &str) -> Result<String> {
        self.client.chat(system_prompt, user_content).await
    }

    async fn health_check(&self) -> Result<bool> {
        self.client.health_check().await
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
