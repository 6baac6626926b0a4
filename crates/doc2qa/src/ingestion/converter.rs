//! Document conversion capability

use std::path::Path;

use crate::error::Result;

/// Converts a document on disk into markdown text
///
/// Implementations:
/// - `MarkdownConverter`: built-in DOCX/PPTX/PDF/TXT/MD conversion
///
/// Conversion is blocking; the processor runs it on a blocking task.
pub trait DocumentConverter: Send + Sync {
    /// Convert the file at `path` to markdown
    fn convert(&self, path: &Path) -> Result<String>;

    /// Get converter name for logging
    fn name(&self) -> &str;
}
