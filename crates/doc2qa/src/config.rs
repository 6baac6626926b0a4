//! Run configuration for the dataset generator

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Settings for a single batch run, loaded once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Folder scanned for documents
    pub folder_path: PathBuf,
    /// Single document processed in single-file mode
    pub file_path: PathBuf,
    /// Directory receiving the JSON datasets
    pub output_dir: PathBuf,
    /// Shuffle pairs inside each per-document dataset
    pub shuffle_qa: bool,
    /// Shuffle pairs in the combined dataset
    pub shuffle_combined: bool,
    /// Descend into subfolders when scanning
    pub recursive: bool,
    /// Ollama/LLM configuration
    pub llm: LlmConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            folder_path: PathBuf::from("docs"),
            file_path: PathBuf::from("docs/example_document.docx"),
            output_dir: PathBuf::from("output"),
            shuffle_qa: true,
            shuffle_combined: true,
            recursive: false,
            llm: LlmConfig::default(),
        }
    }
}

/// LLM (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL, always with a scheme and without a trailing slash
    pub base_url: String,
    /// Generation model name
    pub model: String,
    /// Sampling temperature (server default when unset)
    pub temperature: Option<f32>,
    /// Nucleus sampling cutoff
    pub top_p: Option<f32>,
    /// Repetition penalty
    pub repeat_penalty: Option<f32>,
    /// Maximum number of tokens to generate
    pub num_predict: Option<i64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: normalize_host("localhost:11434"),
            model: "llama3.2:latest".to_string(),
            temperature: None,
            top_p: None,
            repeat_penalty: None,
            num_predict: None,
        }
    }
}

impl RunConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();

        let llm = LlmConfig {
            base_url: get("OLLAMA_HOST")
                .map(|h| normalize_host(&h))
                .unwrap_or(defaults.llm.base_url),
            model: get("OLLAMA_MODEL").unwrap_or(defaults.llm.model),
            temperature: parse_opt("TEMPERATURE", get("TEMPERATURE"))?,
            top_p: parse_opt("TOP_P", get("TOP_P"))?,
            repeat_penalty: parse_opt("PENALTY", get("PENALTY"))?,
            num_predict: parse_opt("MAX_NEW_TOKENS", get("MAX_NEW_TOKENS"))?,
        };

        Ok(Self {
            folder_path: get("FOLDER_PATH").map(PathBuf::from).unwrap_or(defaults.folder_path),
            file_path: get("FILE_PATH").map(PathBuf::from).unwrap_or(defaults.file_path),
            output_dir: get("OUTPUT_DIR").map(PathBuf::from).unwrap_or(defaults.output_dir),
            shuffle_qa: parse_bool("SHUFFLE_QA", get("SHUFFLE_QA"))?.unwrap_or(defaults.shuffle_qa),
            shuffle_combined: parse_bool("SHUFFLE_COMBINED", get("SHUFFLE_COMBINED"))?
                .unwrap_or(defaults.shuffle_combined),
            recursive: parse_bool("RECURSIVE", get("RECURSIVE"))?.unwrap_or(defaults.recursive),
            llm,
        })
    }
}

/// Normalize an Ollama host into a base URL.
///
/// `0.0.0.0` is a bind address, not something a client can reach on every
/// platform, so it is rewritten to `localhost`.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    let host = if host == "0.0.0.0:11434" { "localhost:11434" } else { host };

    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}

fn parse_opt<T: FromStr>(key: &str, value: Option<String>) -> Result<Option<T>> {
    value
        .map(|v| {
            v.parse::<T>()
                .map_err(|_| Error::config(format!("{} has an invalid value: {:?}", key, v)))
        })
        .transpose()
}

fn parse_bool(key: &str, value: Option<String>) -> Result<Option<bool>> {
    value
        .map(|v| match v.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(Error::config(format!("{} is not a boolean: {:?}", key, v))),
        })
        .transpose()
}
