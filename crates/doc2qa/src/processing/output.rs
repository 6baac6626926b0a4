//! Dataset files on disk

use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::{QaDataset, QaPair};

/// `{output_dir}/{stem}_qa_dataset.json`
pub fn document_output_path(output_dir: &Path, stem: &str) -> PathBuf {
    output_dir.join(format!("{}_qa_dataset.json", stem))
}

/// `{output_dir}/{YYYYMMDD}_combined_qa_dataset.json`
pub fn combined_output_path(output_dir: &Path, run_date: NaiveDate) -> PathBuf {
    output_dir.join(format!("{}_combined_qa_dataset.json", run_date.format("%Y%m%d")))
}

/// Write a dataset as a pretty-printed UTF-8 JSON array, replacing any existing file
pub fn write_dataset(path: &Path, pairs: &[QaPair]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(pairs)?;
    fs::write(path, json)?;

    tracing::info!("Saved {} Q&A pairs to {}", pairs.len(), path.display());
    Ok(())
}

/// Read a dataset previously written by `write_dataset`
pub fn read_dataset(path: &Path) -> Result<QaDataset> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_names() {
        let dir = Path::new("output");
        assert_eq!(
            document_output_path(dir, "Quarterly Report"),
            PathBuf::from("output/Quarterly Report_qa_dataset.json")
        );
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(
            combined_output_path(dir, date),
            PathBuf::from("output/20260307_combined_qa_dataset.json")
        );
    }

    #[test]
    fn test_write_then_read_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.json");
        let pairs = vec![
            QaPair::new("Wie heißt das Projekt?", "Phoenix"),
            QaPair::new("Who is the client?", ""),
            QaPair::new("Which part?", "Sensor \"T-1000\""),
        ];

        write_dataset(&path, &pairs).unwrap();
        assert_eq!(read_dataset(&path).unwrap(), pairs);

        // Non-ASCII stays readable in the file
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("heißt"));
        assert!(raw.starts_with("[\n  {"));
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_dataset(&path, &[QaPair::new("Q1", "A1"), QaPair::new("Q2", "A2")]).unwrap();
        write_dataset(&path, &[QaPair::new("Q3", "A3")]).unwrap();
        assert_eq!(read_dataset(&path).unwrap(), vec![QaPair::new("Q3", "A3")]);
    }
}
