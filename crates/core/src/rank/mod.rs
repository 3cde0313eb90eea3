//! Relevance ranking: z-score statistics and snippet extraction.

/// Z-score computation and candidate ordering.
pub mod scorer;
/// Highlighted context-window snippets.
pub mod snippet;

pub use scorer::{best_term, rank, term_stats, z_score, TermStats};
pub use snippet::generate_snippet;
