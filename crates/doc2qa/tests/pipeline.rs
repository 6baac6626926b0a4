//! End-to-end pipeline runs with stub converter and inference providers

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use doc2qa::processing::{combined_output_path, document_output_path, read_dataset};
use doc2qa::{
    BatchOptions, DocumentConverter, Error, InferenceProvider, MarkdownConverter, Processor,
    QaPair, Result,
};

/// Answers every document with the same completion
struct FixedLlm(String);

#[async_trait]
impl InferenceProvider for FixedLlm {
    async fn complete(&self, _system_prompt: &str, _user_content: &str) -> Result<String> {
        Ok(self.0.clone())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "fixed"
    }

    fn model(&self) -> &str {
        "stub"
    }
}

/// Echoes the document text back as a single pair
struct EchoLlm;

#[async_trait]
impl InferenceProvider for EchoLlm {
    async fn complete(&self, _system_prompt: &str, user_content: &str) -> Result<String> {
        let pairs = vec![QaPair::new(format!("What does {} say?", user_content.trim()), user_content.trim())];
        Ok(format!("Sure! Here you go:\n```json\n{}\n```", serde_json::to_string(&pairs)?))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "echo"
    }

    fn model(&self) -> &str {
        "stub"
    }
}

/// Markdown conversion that fails for any file whose stem contains "broken"
struct FlakyConverter;

impl DocumentConverter for FlakyConverter {
    fn convert(&self, path: &Path) -> Result<String> {
        let stem = path.file_stem().unwrap_or_default().to_string_lossy();
        if stem.contains("broken") {
            return Err(Error::conversion(path, "corrupted archive"));
        }
        MarkdownConverter::new().convert(path)
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

#[tokio::test]
async fn test_single_txt_document_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let docs = dir.path().join("docs");
    let out = dir.path().join("output");
    fs::create_dir(&docs).unwrap();
    fs::write(docs.join("phoenix.txt"), "The project is named Phoenix.").unwrap();

    let llm = FixedLlm(r#"[{"question":"What is the project named?","answer":"Phoenix"}]"#.to_string());
    let processor = Processor::new(Arc::new(MarkdownConverter::new()), Arc::new(llm))
        .with_run_date(run_date());

    let datasets = processor
        .process_multiple_documents(&docs, &out, true, true)
        .await
        .unwrap();

    let expected = vec![QaPair::new("What is the project named?", "Phoenix")];
    assert_eq!(datasets, vec![expected.clone()]);
    assert_eq!(read_dataset(&document_output_path(&out, "phoenix")).unwrap(), expected);
    assert_eq!(read_dataset(&combined_output_path(&out, run_date())).unwrap(), expected);
}

#[tokio::test]
async fn test_batch_continues_past_failed_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let docs = dir.path().join("docs");
    let out = dir.path().join("output");
    fs::create_dir(&docs).unwrap();
    fs::write(docs.join("1_first.txt"), "first").unwrap();
    fs::write(docs.join("2_broken.md"), "second").unwrap();
    fs::write(docs.join("3_third.md"), "third").unwrap();
    fs::write(docs.join("budget.xlsx"), "cells").unwrap();

    let processor = Processor::new(Arc::new(FlakyConverter), Arc::new(EchoLlm))
        .with_run_date(run_date());

    let options = BatchOptions {
        shuffle_qa: true,
        shuffle_combined: true,
        recursive: false,
    };
    let summary = processor.run_batch(&docs, &out, &options).await.unwrap();

    assert_eq!(summary.processed.len(), 2);
    assert_eq!(summary.failed.len(), 1);
    assert!(summary.failed[0].path.ends_with("2_broken.md"));
    assert!(matches!(summary.failed[0].error, Error::Conversion { .. }));
    assert_eq!(summary.skipped, vec![docs.join("budget.xlsx")]);

    let answers: Vec<&str> = summary
        .processed
        .iter()
        .map(|d| d.pairs[0].answer.as_str())
        .collect();
    assert_eq!(answers, vec!["first", "third"]);

    assert!(document_output_path(&out, "1_first").exists());
    assert!(!document_output_path(&out, "2_broken").exists());
    assert!(document_output_path(&out, "3_third").exists());

    let combined = read_dataset(summary.combined_path.as_ref().unwrap()).unwrap();
    let combined_answers: HashSet<&str> = combined.iter().map(|p| p.answer.as_str()).collect();
    assert_eq!(combined.len(), 2);
    assert_eq!(combined_answers, HashSet::from(["first", "third"]));
}

#[tokio::test]
async fn test_all_documents_failing_writes_no_combined_file() {
    let dir = tempfile::tempdir().unwrap();
    let docs = dir.path().join("docs");
    let out = dir.path().join("output");
    fs::create_dir(&docs).unwrap();
    fs::write(docs.join("broken.txt"), "x").unwrap();

    let processor = Processor::new(Arc::new(FlakyConverter), Arc::new(EchoLlm))
        .with_run_date(run_date());

    let datasets = processor
        .process_multiple_documents(&docs, &out, false, false)
        .await
        .unwrap();

    assert!(datasets.is_empty());
    assert!(!combined_output_path(&out, run_date()).exists());
}

#[tokio::test]
async fn test_missing_folder_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let processor = Processor::new(Arc::new(MarkdownConverter::new()), Arc::new(EchoLlm));

    let err = processor
        .process_multiple_documents(&dir.path().join("nope"), dir.path(), true, true)
        .await
        .unwrap_err();

    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_unshuffled_combined_keeps_document_order() {
    let dir = tempfile::tempdir().unwrap();
    let docs = dir.path().join("docs");
    let out = dir.path().join("output");
    fs::create_dir(&docs).unwrap();
    for name in ["a.txt", "b.txt", "c.txt"] {
        fs::write(docs.join(name), name).unwrap();
    }

    let processor = Processor::new(Arc::new(MarkdownConverter::new()), Arc::new(EchoLlm))
        .with_run_date(run_date());

    processor
        .process_multiple_documents(&docs, &out, false, false)
        .await
        .unwrap();

    let combined = read_dataset(&combined_output_path(&out, run_date())).unwrap();
    let answers: Vec<&str> = combined.iter().map(|p| p.answer.as_str()).collect();
    assert_eq!(answers, vec!["a.txt", "b.txt", "c.txt"]);
}
