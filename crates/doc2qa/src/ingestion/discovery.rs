//! Folder scanning for supported documents

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::types::{Document, DocumentFormat};

/// Result of scanning a folder
#[derive(Debug, Default, Clone)]
pub struct Discovery {
    /// Supported documents, sorted by path
    pub documents: Vec<Document>,
    /// Files skipped because of their extension
    pub unsupported: Vec<PathBuf>,
}

/// Scan `folder` for documents with a supported extension.
///
/// Only the top level is visited unless `recursive` is set. Hidden files
/// (leading `.`) such as `.DS_Store` or Office lock files are ignored.
pub fn discover_documents(folder: &Path, recursive: bool) -> Result<Discovery> {
    if !folder.is_dir() {
        return Err(Error::config(format!(
            "Folder path does not exist or is not a directory: {}",
            folder.display()
        )));
    }

    tracing::info!("Searching for documents in: {}", folder.display());

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut discovery = Discovery::default();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {}: {}", folder.display(), e);
                None
            }
        })
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if hidden {
            continue;
        }

        match Document::from_path(entry.path()) {
            Ok(doc) => discovery.documents.push(doc),
            Err(_) => {
                tracing::debug!("Skipping unsupported file: {}", entry.path().display());
                discovery.unsupported.push(entry.into_path());
            }
        }
    }

    discovery.documents.sort_by(|a, b| a.path().cmp(b.path()));

    for format in DocumentFormat::ALL {
        let count = discovery
            .documents
            .iter()
            .filter(|d| d.format() == format)
            .count();
        tracing::info!("Found {} files with extension .{}", count, format.extension());
    }

    Ok(discovery)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discovery_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.TXT", "c.md", "sheet.xlsx", ".~lock.a.docx#", "deck.pptx"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/inner.docx"), "x").unwrap();

        let found = discover_documents(dir.path(), false).unwrap();
        let names: Vec<String> = found
            .documents
            .iter()
            .map(|d| d.path().file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.TXT", "b.pdf", "c.md", "deck.pptx"]);
        assert_eq!(found.unsupported, vec![dir.path().join("sheet.xlsx")]);
    }

    #[test]
    fn test_recursive_discovery() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("top.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/inner.docx"), "x").unwrap();

        let found = discover_documents(dir.path(), true).unwrap();
        assert_eq!(found.documents.len(), 2);
        assert!(found
            .documents
            .iter()
            .any(|d| d.path().ends_with("nested/inner.docx")));
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_does_not_abort_scan() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("kept.txt"), "x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.txt"), dir.path().join("dangling.txt"))
            .unwrap();

        let found = discover_documents(dir.path(), false).unwrap();
        assert_eq!(found.documents.len(), 1);
        assert!(found.documents[0].path().ends_with("kept.txt"));
    }

    #[test]
    fn test_missing_folder_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_documents(&dir.path().join("missing"), false).unwrap_err();
        assert!(err.is_fatal());
    }
}
