//! Query-facing engine handle.
//!
//! [`SearchEngine`] wraps the immutable-once-built [`IndexData`] behind a
//! read-write lock: queries take a read lock, and a rebuild constructs a
//! fresh `IndexData` without any lock before swapping it in under a brief
//! write lock. One engine is constructed at startup and cloned into every
//! request handler.

use crate::document::Document;
use crate::index::store::{IndexData, IndexStatistics};
use crate::query;
use crate::rank;
use parking_lot::RwLock;
use std::sync::Arc;

/// A document with its relevance score for one query.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    /// The matched document (shared reference).
    pub document: Arc<Document>,
    /// Mean z-score over the distinct query terms.
    pub score: f64,
}

/// Thread-safe handle over the built index.
///
/// Cloning a `SearchEngine` produces a new handle to the same shared data.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    data: Arc<RwLock<IndexData>>,
}

impl SearchEngine {
    /// Wraps a built index in an engine handle.
    pub fn new(data: IndexData) -> Self {
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// Evaluates a boolean query and returns the matching documents ranked
    /// by score descending, ties broken by document id ascending.
    pub fn query(&self, raw: &str) -> Vec<ScoredDocument> {
        let data = self.data.read();
        let candidates = query::evaluate(&data.trie, raw);
        if candidates.is_empty() {
            return Vec::new();
        }
        let terms = query::query_terms(raw);

        rank::rank(&data, &candidates, &terms)
            .into_iter()
            .filter_map(|(internal, score)| {
                let id = data.public_id(internal)?;
                data.documents.get(id).map(|doc| ScoredDocument {
                    document: Arc::clone(doc),
                    score,
                })
            })
            .collect()
    }

    /// Retrieves a document by public id, or `None` if not found.
    pub fn document(&self, id: &str) -> Option<Arc<Document>> {
        self.data.read().documents.get(id).cloned()
    }

    /// Builds a highlighted snippet of the document for the given query
    /// terms, or `None` if the document id is unknown.
    pub fn snippet(&self, id: &str, terms: &[String]) -> Option<String> {
        rank::generate_snippet(&self.data.read(), id, terms)
    }

    /// Aggregate statistics of the current index.
    pub fn statistics(&self) -> IndexStatistics {
        self.data.read().statistics()
    }

    /// Number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.data.read().doc_count
    }

    /// Swaps in a freshly built index. The caller builds the new data
    /// without holding any lock; the swap itself is brief, so concurrent
    /// readers never observe a partially rebuilt index.
    pub fn replace(&self, new: IndexData) {
        *self.data.write() = new;
    }
}
