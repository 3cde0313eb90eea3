//! Corpus walker: builds an [`IndexData`] from a directory tree.
//!
//! The corpus root holds one subdirectory per category; each `.txt` file in a
//! category becomes one document. Enumeration order is made deterministic by
//! sorting directory entries. A file that cannot be read is logged, counted,
//! and skipped — a single bad file never aborts the build.

use crate::config;
use crate::index::store::IndexData;
use std::fs;
use std::io;
use std::path::Path;

/// Summary of one build pass over the corpus.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Documents successfully read and indexed.
    pub documents_indexed: usize,
    /// Category directories visited.
    pub categories: usize,
    /// Files that could not be read and were skipped.
    pub files_skipped: usize,
}

/// Builds a fresh index from the corpus at `corpus_root`.
///
/// A missing or unreadable corpus root is an error; everything below it is
/// best-effort: unreadable categories and files are logged and skipped.
pub fn build_index(corpus_root: &Path) -> io::Result<(IndexData, BuildReport)> {
    let mut data = IndexData::new();
    let mut report = BuildReport::default();

    let mut categories: Vec<_> = fs::read_dir(corpus_root)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    categories.sort();

    for category_path in categories {
        let Some(category) = category_path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let category = category.to_string();
        tracing::info!("Indexing category '{}'", category);
        report.categories += 1;

        let entries = match fs::read_dir(&category_path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Cannot read category directory {:?}: {}", category_path, e);
                continue;
            }
        };
        let mut files: Vec<_> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|ext| ext.to_str()) == Some(config::CORPUS_FILE_EXT)
            })
            .collect();
        files.sort();

        for path in files {
            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                report.files_skipped += 1;
                continue;
            };
            match fs::read(&path) {
                Ok(bytes) => {
                    // Invalid UTF-8 is replaced, not rejected — corpus files
                    // occasionally carry stray legacy-encoded bytes.
                    let text = String::from_utf8_lossy(&bytes);
                    data.add_document(&category, filename, &text, &path.to_string_lossy());
                    report.documents_indexed += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to read {:?}: {} — skipping", path, e);
                    report.files_skipped += 1;
                }
            }
        }
    }

    tracing::info!(
        documents = report.documents_indexed,
        categories = report.categories,
        skipped = report.files_skipped,
        "Corpus indexed"
    );
    Ok((data, report))
}
