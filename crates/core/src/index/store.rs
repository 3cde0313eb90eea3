//! Document store and corpus-wide term statistics.
//!
//! [`IndexData`] is the single snapshot unit: the trie, the document records,
//! the per-document term frequencies and lengths, and the corpus totals the
//! ranker needs. Documents are addressed internally by dense u32 ids; the
//! public `"<category>/<filename>"` ids map to them through
//! `id_to_internal` / `internal_to_id`.

use crate::document::Document;
use crate::index::tokenizer::tokenize;
use crate::index::trie::CompactTrie;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Aggregate index statistics exposed through the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStatistics {
    /// Number of indexed documents.
    pub document_count: usize,
    /// Number of distinct terms in the corpus.
    pub unique_terms: usize,
    /// Total term occurrences across the corpus, repeats included.
    pub total_terms: u64,
    /// Mean document length in tokens.
    pub avg_doc_length: f64,
}

/// Everything the engine needs to answer queries, built in one pass over the
/// corpus and persisted as one snapshot.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct IndexData {
    /// Inverted index: term → internal doc-id set.
    pub trie: CompactTrie,
    /// Document records by public id.
    pub documents: HashMap<String, Arc<Document>>,
    /// Public id → internal u32 id.
    pub id_to_internal: HashMap<String, u32>,
    /// Reverse map: internal u32 id → public id. Indexed by internal id.
    pub internal_to_id: Vec<String>,
    /// Per-document term occurrence counts. Indexed by internal id.
    pub term_frequencies: Vec<HashMap<String, u32>>,
    /// Document lengths in tokens, repeats included. Indexed by internal id.
    pub doc_lengths: Vec<u32>,
    /// Sum of all document lengths (for average calculation).
    pub total_doc_length: u64,
    /// term → total occurrences across the corpus.
    pub corpus_term_freq: HashMap<String, u64>,
    /// Total number of documents indexed.
    pub doc_count: usize,
}

impl IndexData {
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next internal id for a public id.
    fn assign_internal_id(&mut self, id: String) -> u32 {
        let internal = self.internal_to_id.len() as u32;
        self.id_to_internal.insert(id.clone(), internal);
        self.internal_to_id.push(id);
        internal
    }

    /// Indexes one corpus file: splits off the title, tokenizes the body,
    /// records per-document frequencies and length, inserts each distinct
    /// term into the trie, and accumulates the corpus totals.
    ///
    /// A duplicate document id is skipped — ids derive from unique paths, so
    /// a collision means the caller walked the same file twice.
    pub fn add_document(&mut self, category: &str, filename: &str, raw: &str, source_path: &str) {
        let doc = Document::from_raw(category, filename, raw, source_path);
        if self.documents.contains_key(&doc.id) {
            tracing::warn!("Duplicate document id '{}' skipped", doc.id);
            return;
        }
        let doc_id = doc.id.clone();
        let internal = self.assign_internal_id(doc_id.clone());

        let tokens = tokenize(&doc.body);
        let doc_len = tokens.len() as u32;

        let mut tf: HashMap<&str, u32> = HashMap::new();
        for token in tokens.iter() {
            *tf.entry(token).or_insert(0) += 1;
        }

        // The trie records presence (one insert per distinct term); the
        // corpus totals accumulate the full occurrence count.
        for (term, count) in &tf {
            self.trie.insert(term, internal);
            *self.corpus_term_freq.entry((*term).to_string()).or_insert(0) += u64::from(*count);
        }

        self.term_frequencies
            .push(tf.into_iter().map(|(t, c)| (t.to_string(), c)).collect());
        self.doc_lengths.push(doc_len);
        self.total_doc_length += u64::from(doc_len);
        self.doc_count += 1;
        self.documents.insert(doc_id, Arc::new(doc));
    }

    /// Occurrence count of `term` (already case-folded) in the given document.
    /// Absent documents or terms count as 0.
    pub fn term_frequency(&self, internal: u32, term: &str) -> u32 {
        self.term_frequencies
            .get(internal as usize)
            .and_then(|m| m.get(term))
            .copied()
            .unwrap_or(0)
    }

    /// Public id for an internal doc id, if in bounds.
    pub fn public_id(&self, internal: u32) -> Option<&str> {
        self.internal_to_id.get(internal as usize).map(String::as_str)
    }

    /// Aggregate statistics over the indexed corpus.
    pub fn statistics(&self) -> IndexStatistics {
        IndexStatistics {
            document_count: self.doc_count,
            unique_terms: self.corpus_term_freq.len(),
            total_terms: self.corpus_term_freq.values().sum(),
            avg_doc_length: if self.doc_count > 0 {
                self.total_doc_length as f64 / self.doc_count as f64
            } else {
                0.0
            },
        }
    }

    /// Validate internal invariants after deserialization.
    ///
    /// Checks that all parallel arrays have consistent lengths, that the id
    /// mappings are symmetric, that the length and occurrence totals match
    /// the per-document data, and that the trie vocabulary agrees with the
    /// corpus term table.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.doc_count;

        if self.documents.len() != n {
            return Err(format!("documents length {} != doc_count {}", self.documents.len(), n));
        }
        if self.internal_to_id.len() != n {
            return Err(format!(
                "internal_to_id length {} != doc_count {}",
                self.internal_to_id.len(),
                n
            ));
        }
        if self.id_to_internal.len() != n {
            return Err(format!(
                "id_to_internal length {} != doc_count {}",
                self.id_to_internal.len(),
                n
            ));
        }
        if self.term_frequencies.len() != n {
            return Err(format!(
                "term_frequencies length {} != doc_count {}",
                self.term_frequencies.len(),
                n
            ));
        }
        if self.doc_lengths.len() != n {
            return Err(format!(
                "doc_lengths length {} != doc_count {}",
                self.doc_lengths.len(),
                n
            ));
        }

        // Id mappings must be symmetric and every id must have a record.
        for (internal, id) in self.internal_to_id.iter().enumerate() {
            if self.id_to_internal.get(id) != Some(&(internal as u32)) {
                return Err(format!("id mapping asymmetric for '{}'", id));
            }
            if !self.documents.contains_key(id) {
                return Err(format!("no document record for '{}'", id));
            }
        }

        let length_sum: u64 = self.doc_lengths.iter().map(|&l| u64::from(l)).sum();
        if length_sum != self.total_doc_length {
            return Err(format!(
                "doc_lengths sum {} != total_doc_length {}",
                length_sum, self.total_doc_length
            ));
        }

        if self.trie.len() != self.corpus_term_freq.len() {
            return Err(format!(
                "trie term count {} != corpus term count {}",
                self.trie.len(),
                self.corpus_term_freq.len()
            ));
        }

        // Corpus totals must equal the sum of per-document frequencies.
        let mut tally: HashMap<&str, u64> = HashMap::with_capacity(self.corpus_term_freq.len());
        for tf in &self.term_frequencies {
            for (term, count) in tf {
                *tally.entry(term.as_str()).or_insert(0) += u64::from(*count);
            }
        }
        if tally.len() != self.corpus_term_freq.len() {
            return Err(format!(
                "per-document vocabulary {} != corpus vocabulary {}",
                tally.len(),
                self.corpus_term_freq.len()
            ));
        }
        for (term, total) in &tally {
            if self.corpus_term_freq.get(*term) != Some(total) {
                return Err(format!("corpus total mismatch for term '{}'", term));
            }
        }

        Ok(())
    }
}
