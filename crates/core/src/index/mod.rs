//! Index layer: compact trie, tokenizer, document store, and corpus builder.
//!
//! The trie maps case-folded terms to internal document-id sets; the store
//! keeps document records and the frequency statistics the ranker consumes;
//! the builder drives both over a category-per-directory corpus.

/// Corpus walker producing a complete index in one pass.
pub mod builder;
/// Document store, id mappings, and corpus statistics.
pub mod store;
/// Case-folding alphanumeric tokenizer.
pub mod tokenizer;
/// Path-compressed trie storing the inverted index.
pub mod trie;

pub use builder::{build_index, BuildReport};
pub use store::{IndexData, IndexStatistics};
pub use tokenizer::tokenize;
pub use trie::CompactTrie;
