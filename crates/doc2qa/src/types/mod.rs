//! Core types for the dataset generator

pub mod document;
pub mod qa;

pub use document::{Document, DocumentFormat};
pub use qa::{QaDataset, QaPair};
