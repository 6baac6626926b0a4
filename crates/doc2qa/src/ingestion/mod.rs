//! Document discovery and markdown conversion

mod converter;
pub mod discovery;
mod parser;

pub use converter::DocumentConverter;
pub use discovery::{discover_documents, Discovery};
pub use parser::MarkdownConverter;
