//! Core document type for lexis.db.
//!
//! A `Document` is one corpus file: its first line is the title, the rest is
//! the indexed body. Documents are identified by `"<category>/<filename>"`
//! and are immutable once created — any change to the corpus requires a full
//! rebuild of the index.

use serde::{Deserialize, Serialize};

/// A stored document with title, body, and category.
///
/// The `id` is `"<category>/<filename>"`, unique across the corpus. Only the
/// body is tokenized and indexed; the title is presentation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier: `"<category>/<filename>"`.
    pub id: String,
    /// First line of the source file, trimmed.
    pub title: String,
    /// Remaining text after the title line. Indexed by the trie.
    pub body: String,
    /// Category, taken from the corpus subdirectory name.
    pub category: String,
    /// Path of the source file this document was read from.
    pub source_path: String,
}

impl Document {
    /// Creates a document from a raw corpus file: the first line becomes the
    /// title, everything after the first newline becomes the body.
    pub fn from_raw(category: &str, filename: &str, raw: &str, source_path: &str) -> Self {
        let (title, body) = match raw.split_once('\n') {
            Some((first, rest)) => (first.trim().to_string(), rest.to_string()),
            None => (raw.trim().to_string(), String::new()),
        };
        Self {
            id: format!("{}/{}", category, filename),
            title,
            body,
            category: category.to_string(),
            source_path: source_path.to_string(),
        }
    }
}
