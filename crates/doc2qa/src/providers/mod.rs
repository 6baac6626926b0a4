//! Provider abstractions for language-model inference
//!
//! The processor only sees the `InferenceProvider` trait, so the Ollama
//! backend can be swapped for a deterministic stand-in in tests.

pub mod llm;
pub mod ollama;

pub use llm::InferenceProvider;
pub use ollama::OllamaLlm;
