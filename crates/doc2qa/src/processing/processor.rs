//! Per-document and batch Q&A generation pipeline

use chrono::{Local, NaiveDate};
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::generation::{parse_response, SYSTEM_PROMPT};
use crate::ingestion::{discover_documents, DocumentConverter};
use crate::providers::InferenceProvider;
use crate::types::{Document, QaDataset, QaPair};

use super::output::{combined_output_path, document_output_path, write_dataset};

/// Flags controlling a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Shuffle pairs inside each per-document dataset
    pub shuffle_qa: bool,
    /// Shuffle the combined dataset, independently of per-document shuffles
    pub shuffle_combined: bool,
    /// Descend into subfolders
    pub recursive: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            shuffle_qa: true,
            shuffle_combined: true,
            recursive: false,
        }
    }
}

impl From<&RunConfig> for BatchOptions {
    fn from(config: &RunConfig) -> Self {
        Self {
            shuffle_qa: config.shuffle_qa,
            shuffle_combined: config.shuffle_combined,
            recursive: config.recursive,
        }
    }
}

/// A document that made it through the whole pipeline
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub path: PathBuf,
    pub output_path: PathBuf,
    pub pairs: QaDataset,
}

/// A document that failed at some stage
#[derive(Debug)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub error: Error,
}

/// Outcome of a run, for the operator summary
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Successfully processed documents, in processing order
    pub processed: Vec<ProcessedDocument>,
    /// Files left out because of their extension
    pub skipped: Vec<PathBuf>,
    /// Documents whose conversion, inference or parsing failed
    pub failed: Vec<DocumentFailure>,
    /// Combined dataset file, when one was written
    pub combined_path: Option<PathBuf>,
    /// Why the combined dataset could not be written
    pub combined_error: Option<Error>,
}

impl BatchSummary {
    /// Total pairs across all processed documents
    pub fn total_pairs(&self) -> usize {
        self.processed.iter().map(|d| d.pairs.len()).sum()
    }

    /// A run succeeds when at least one document was processed, even if others failed
    pub fn is_success(&self) -> bool {
        !self.processed.is_empty()
    }

    /// Per-document datasets with failures filtered out
    pub fn into_datasets(self) -> Vec<QaDataset> {
        self.processed.into_iter().map(|d| d.pairs).collect()
    }
}

/// Uniform in-place shuffle with the thread-local RNG (not reproducible)
pub fn shuffle_pairs(pairs: &mut [QaPair]) {
    pairs.shuffle(&mut rand::thread_rng());
}

/// Orchestrates conversion, inference and parsing for documents
pub struct Processor {
    converter: Arc<dyn DocumentConverter>,
    llm: Arc<dyn InferenceProvider>,
    run_date: NaiveDate,
}

impl Processor {
    /// Create a processor dated with today's local date
    pub fn new(converter: Arc<dyn DocumentConverter>, llm: Arc<dyn InferenceProvider>) -> Self {
        Self {
            converter,
            llm,
            run_date: Local::now().date_naive(),
        }
    }

    /// Override the date used to name the combined output file
    pub fn with_run_date(mut self, run_date: NaiveDate) -> Self {
        self.run_date = run_date;
        self
    }

    /// Convert, generate, parse, optionally shuffle and save one document
    pub async fn process_document(
        &self,
        path: &Path,
        output_dir: &Path,
        shuffle_qa: bool,
    ) -> Result<QaDataset> {
        let (dataset, _) = self.process_one(path, output_dir, shuffle_qa).await?;
        Ok(dataset)
    }

    async fn process_one(
        &self,
        path: &Path,
        output_dir: &Path,
        shuffle_qa: bool,
    ) -> Result<(QaDataset, PathBuf)> {
        let document = Document::from_path(path)?;

        tracing::info!(
            "Converting {} to markdown with {} converter: {}",
            document.format().display_name(),
            self.converter.name(),
            path.display()
        );
        let markdown = self.convert(&document).await?;
        tracing::info!("Converted document to markdown ({} chars)", markdown.len());

        tracing::info!("Generating Q&A pairs with {} ({})", self.llm.name(), self.llm.model());
        let raw = self.llm.complete(SYSTEM_PROMPT, &markdown).await?;
        tracing::info!("Received model response ({} chars)", raw.len());

        let mut dataset = parse_response(&raw)?;
        tracing::info!("Parsed {} Q&A pairs", dataset.len());

        if shuffle_qa {
            shuffle_pairs(&mut dataset);
            tracing::debug!("Q&A pairs have been shuffled");
        }

        let output_path = document_output_path(output_dir, &document.stem());
        write_dataset(&output_path, &dataset)?;

        Ok((dataset, output_path))
    }

    /// Conversion is CPU-bound and blocking, so it runs off the async workers
    async fn convert(&self, document: &Document) -> Result<String> {
        let converter = Arc::clone(&self.converter);
        let path = document.path().to_path_buf();

        tokio::task::spawn_blocking(move || converter.convert(&path))
            .await
            .map_err(|e| Error::conversion(document.path(), format!("conversion task failed: {}", e)))?
    }

    /// Process every supported document in `folder`, returning the per-document datasets
    pub async fn process_multiple_documents(
        &self,
        folder: &Path,
        output_dir: &Path,
        shuffle_qa: bool,
        shuffle_combined: bool,
    ) -> Result<Vec<QaDataset>> {
        let options = BatchOptions {
            shuffle_qa,
            shuffle_combined,
            ..BatchOptions::default()
        };
        Ok(self.run_batch(folder, output_dir, &options).await?.into_datasets())
    }

    /// Process a folder; one failing document never aborts the rest
    pub async fn run_batch(
        &self,
        folder: &Path,
        output_dir: &Path,
        options: &BatchOptions,
    ) -> Result<BatchSummary> {
        let discovery = discover_documents(folder, options.recursive)?;

        let mut summary = BatchSummary {
            skipped: discovery.unsupported,
            ..BatchSummary::default()
        };

        let total = discovery.documents.len();
        if total == 0 {
            tracing::warn!("No supported documents found in {}", folder.display());
            return Ok(summary);
        }

        tracing::info!("Found {} documents to process", total);

        let mut targets: HashSet<PathBuf> = HashSet::new();

        for (i, document) in discovery.documents.iter().enumerate() {
            let path = document.path();
            tracing::info!("Processing document {}/{}: {}", i + 1, total, path.display());

            let target = document_output_path(output_dir, &document.stem());
            if !targets.insert(target.clone()) {
                tracing::warn!(
                    "{} shares its name with an earlier document, {} will be overwritten",
                    path.display(),
                    target.display()
                );
            }

            match self.process_one(path, output_dir, options.shuffle_qa).await {
                Ok((pairs, output_path)) => {
                    tracing::info!("Successfully processed document {}/{}: {}", i + 1, total, path.display());
                    summary.processed.push(ProcessedDocument {
                        path: path.to_path_buf(),
                        output_path,
                        pairs,
                    });
                }
                Err(e) => {
                    tracing::error!("Failed to process {}: {}", path.display(), e);
                    summary.failed.push(DocumentFailure {
                        path: path.to_path_buf(),
                        error: e,
                    });
                }
            }
        }

        if summary.processed.is_empty() {
            tracing::warn!("No documents were processed, skipping combined dataset");
            return Ok(summary);
        }

        let mut combined: QaDataset = summary
            .processed
            .iter()
            .flat_map(|d| d.pairs.iter().cloned())
            .collect();

        if options.shuffle_combined {
            shuffle_pairs(&mut combined);
            tracing::debug!("Combined Q&A pairs have been shuffled");
        }

        let combined_path = combined_output_path(output_dir, self.run_date);
        match write_dataset(&combined_path, &combined) {
            Ok(()) => summary.combined_path = Some(combined_path),
            Err(e) => {
                tracing::error!("Failed to save combined dataset {}: {}", combined_path.display(), e);
                summary.combined_error = Some(e);
            }
        }

        Ok(summary)
    }

    /// Process one explicitly configured file; no combined dataset is written
    pub async fn run_single(
        &self,
        path: &Path,
        output_dir: &Path,
        shuffle_qa: bool,
    ) -> Result<BatchSummary> {
        if !path.is_file() {
            return Err(Error::config(format!("File path does not exist: {}", path.display())));
        }

        let mut summary = BatchSummary::default();
        match self.process_one(path, output_dir, shuffle_qa).await {
            Ok((pairs, output_path)) => summary.processed.push(ProcessedDocument {
                path: path.to_path_buf(),
                output_path,
                pairs,
            }),
            Err(e @ Error::UnsupportedFormat(_)) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                summary.skipped.push(path.to_path_buf());
            }
            Err(e) => {
                tracing::error!("Failed to process {}: {}", path.display(), e);
                summary.failed.push(DocumentFailure {
                    path: path.to_path_buf(),
                    error: e,
                });
            }
        }

        Ok(summary)
    }
}
