//! Q&A generation: prompt, Ollama client and response parsing

pub mod ollama;
pub mod prompt;
pub mod response;

pub use ollama::OllamaClient;
pub use prompt::SYSTEM_PROMPT;
pub use response::{extract_json_array, parse_response};
