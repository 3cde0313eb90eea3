//! Boolean query parsing and evaluation.
//!
//! Queries are tokenized, converted to postfix with Shunting-Yard, and
//! evaluated on a single stack of document-id sets. The grammar is
//! intentionally tolerant: no input is a syntax error.

/// Postfix evaluation over document-id sets.
pub mod evaluator;
/// Query tokenizer and Shunting-Yard conversion.
pub mod parser;

pub use evaluator::evaluate;
pub use parser::{query_terms, tokenize_query, to_postfix, QueryToken};
