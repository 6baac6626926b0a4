//! doc2qa: turn office documents into question/answer fine-tuning datasets
//!
//! Documents (DOCX, PPTX, PDF, TXT, MD) are converted to markdown, sent to a
//! local Ollama model with a fixed extraction prompt, and the JSON array in
//! the model's reply is saved per document plus one combined file per run.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod processing;
pub mod providers;
pub mod types;

pub use config::{LlmConfig, RunConfig};
pub use error::{Error, Result};
pub use ingestion::{DocumentConverter, MarkdownConverter};
pub use processing::{BatchOptions, BatchSummary, Processor};
pub use providers::{InferenceProvider, OllamaLlm};
pub use types::{Document, DocumentFormat, QaDataset, QaPair};
