//! Error types for the dataset generator

use std::path::Path;

use thiserror::Error;

/// Result type alias for doc2qa operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning documents into Q&A datasets
#[derive(Debug, Error)]
pub enum Error {
    /// Unusable configuration (missing folder/file, unparseable setting)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Extension outside the supported set
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Document to markdown conversion failed
    #[error("Failed to convert '{path}': {message}")]
    Conversion { path: String, message: String },

    /// Inference endpoint unreachable, timed out or answered with an error
    #[error("Inference error: {0}")]
    Inference(String),

    /// Completion text holds no parseable JSON array
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a conversion error for the given document
    pub fn conversion(path: &Path, message: impl Into<String>) -> Self {
        Self::Conversion {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    /// Create an inference error
    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference(message.into())
    }

    /// Create a malformed response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Whether this error should abort the whole run rather than a single document
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_config_is_fatal() {
        assert!(Error::config("folder missing").is_fatal());
        assert!(!Error::UnsupportedFormat("xlsx".into()).is_fatal());
        assert!(!Error::inference("connection refused").is_fatal());
        assert!(!Error::malformed("no array").is_fatal());
    }

    #[test]
    fn test_conversion_message_names_document() {
        let err = Error::conversion(Path::new("docs/report.pdf"), "no text");
        assert_eq!(err.to_string(), "Failed to convert 'docs/report.pdf': no text");
    }
}
