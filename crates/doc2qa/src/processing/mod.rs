//! Document processing pipeline and dataset output

pub mod output;
mod processor;

pub use output::{combined_output_path, document_output_path, read_dataset, write_dataset};
pub use processor::{
    shuffle_pairs, BatchOptions, BatchSummary, DocumentFailure, ProcessedDocument, Processor,
};
