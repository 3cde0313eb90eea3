//! Z-score relevance scoring.
//!
//! A term's z-score in a document measures how over-represented the term is
//! there relative to the whole corpus: `(tf − mean) / std_dev`, where the
//! mean and the population standard deviation are taken over the per-document
//! occurrence counts of **every** document (documents lacking the term count
//! as 0). A document's score for a query is the arithmetic mean of its
//! z-scores over the distinct query terms.

use crate::index::store::IndexData;
use ordered_float::OrderedFloat;
use std::collections::HashSet;

/// Corpus-wide occurrence statistics for one term.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermStats {
    /// Mean per-document occurrence count.
    pub mean: f64,
    /// Population standard deviation of per-document occurrence counts.
    pub std_dev: f64,
}

/// Computes [`TermStats`] for a case-folded term. A term absent from the
/// corpus (or an empty corpus) yields the zeroed default.
pub fn term_stats(data: &IndexData, term: &str) -> TermStats {
    let total = data.corpus_term_freq.get(term).copied().unwrap_or(0);
    if total == 0 || data.doc_count == 0 {
        return TermStats::default();
    }
    let n = data.doc_count as f64;
    let mean = total as f64 / n;

    // Documents lacking the term contribute zero to the sum of squares, so
    // the posting set from the trie covers the whole corpus:
    // variance = Σ tf² / N − mean².
    let sum_sq: f64 = data
        .trie
        .search(term)
        .iter()
        .map(|&doc| {
            let tf = f64::from(data.term_frequency(doc, term));
            tf * tf
        })
        .sum();
    let variance = (sum_sq / n - mean * mean).max(0.0);
    TermStats {
        mean,
        std_dev: variance.sqrt(),
    }
}

/// Z-score of `term` in one document. Defined as 0.0 when the term is absent
/// from the document, absent from the corpus, or uniformly distributed
/// (zero standard deviation).
pub fn z_score(data: &IndexData, stats: &TermStats, internal: u32, term: &str) -> f64 {
    let tf = data.term_frequency(internal, term);
    if tf == 0 || stats.std_dev == 0.0 {
        return 0.0;
    }
    (f64::from(tf) - stats.mean) / stats.std_dev
}

/// Scores the candidate documents against the distinct query terms and
/// returns them ordered by score descending, ties broken by document id
/// ascending.
pub fn rank(data: &IndexData, candidates: &HashSet<u32>, terms: &[String]) -> Vec<(u32, f64)> {
    let stats: Vec<TermStats> = terms.iter().map(|t| term_stats(data, t)).collect();

    let mut scored: Vec<(u32, f64)> = candidates
        .iter()
        .map(|&doc| {
            let score = if terms.is_empty() {
                0.0
            } else {
                let sum: f64 = terms
                    .iter()
                    .zip(&stats)
                    .map(|(term, st)| z_score(data, st, doc, term))
                    .sum();
                sum / terms.len() as f64
            };
            (doc, score)
        })
        .collect();

    scored.sort_unstable_by(|a, b| {
        OrderedFloat(b.1)
            .cmp(&OrderedFloat(a.1))
            .then_with(|| data.public_id(a.0).cmp(&data.public_id(b.0)))
    });
    scored
}

/// Picks the query term with the highest z-score for this document, keeping
/// the first-encountered term on ties. `None` only for an empty term list.
pub fn best_term<'a>(data: &IndexData, internal: u32, terms: &'a [String]) -> Option<&'a str> {
    let mut best: Option<(&str, f64)> = None;
    for term in terms {
        let stats = term_stats(data, term);
        let z = z_score(data, &stats, internal, term);
        match best {
            Some((_, best_z)) if z <= best_z => {}
            _ => best = Some((term, z)),
        }
    }
    best.map(|(term, _)| term)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixture: doc0 {economy, growth}, doc1 {economy, recession},
    /// doc2 {growth, market}; every term once per document.
    fn sample_index() -> IndexData {
        let mut data = IndexData::new();
        data.add_document("news", "doc1.txt", "T\neconomy growth", "p1");
        data.add_document("news", "doc2.txt", "T\neconomy recession", "p2");
        data.add_document("news", "doc3.txt", "T\ngrowth market", "p3");
        data
    }

    fn candidates(ids: &[u32]) -> HashSet<u32> {
        ids.iter().copied().collect()
    }

    // ── Term statistics ────────────────────────────────────────────────

    #[test]
    fn test_term_stats_matches_definition() {
        let data = sample_index();
        // economy: counts [1, 1, 0], mean 2/3, variance 2/9.
        let stats = term_stats(&data, "economy");
        assert!((stats.mean - 2.0 / 3.0).abs() < 1e-12);
        assert!((stats.std_dev - (2.0f64 / 9.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_term_stats_absent_term() {
        let data = sample_index();
        let stats = term_stats(&data, "inflation");
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_z_score_values() {
        let data = sample_index();
        let stats = term_stats(&data, "economy");
        // (1 − 2/3) / sqrt(2/9)
        let expected = (1.0 - 2.0 / 3.0) / (2.0f64 / 9.0).sqrt();
        assert!((z_score(&data, &stats, 0, "economy") - expected).abs() < 1e-12);
        // Absent from doc2 (internal 2) → 0.
        assert_eq!(z_score(&data, &stats, 2, "economy"), 0.0);
    }

    #[test]
    fn test_z_score_zero_deviation() {
        // A term occurring exactly once in every document has zero deviation.
        let mut data = IndexData::new();
        data.add_document("c", "1.txt", "T\ncommon alpha", "p");
        data.add_document("c", "2.txt", "T\ncommon beta", "p");
        let stats = term_stats(&data, "common");
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(z_score(&data, &stats, 0, "common"), 0.0);
    }

    // ── Ranking ────────────────────────────────────────────────────────

    #[test]
    fn test_rank_orders_by_score_desc() {
        let mut data = IndexData::new();
        data.add_document("c", "heavy.txt", "T\ntax tax tax reform", "p");
        data.add_document("c", "light.txt", "T\ntax policy notes", "p");
        data.add_document("c", "none.txt", "T\nunrelated words entirely", "p");

        let ranked = rank(&data, &candidates(&[0, 1]), &["tax".to_string()]);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].0, 0, "doc with higher tf ranks first");
        assert!(ranked[0].1 > ranked[1].1);
    }

    #[test]
    fn test_rank_tie_breaks_by_document_id() {
        let data = sample_index();
        // "growth" appears once in doc1 and doc3: identical z-scores.
        let ranked = rank(&data, &candidates(&[0, 2]), &["growth".to_string()]);
        assert!((ranked[0].1 - ranked[1].1).abs() < 1e-12);
        assert_eq!(data.public_id(ranked[0].0), Some("news/doc1.txt"));
        assert_eq!(data.public_id(ranked[1].0), Some("news/doc3.txt"));
    }

    #[test]
    fn test_rank_score_is_mean_over_terms() {
        let data = sample_index();
        let terms = vec!["economy".to_string(), "growth".to_string()];
        let ranked = rank(&data, &candidates(&[0]), &terms);
        let z = (1.0 - 2.0 / 3.0) / (2.0f64 / 9.0).sqrt();
        // doc0 contains both terms with identical distributions.
        assert!((ranked[0].1 - z).abs() < 1e-12);
    }

    #[test]
    fn test_rank_empty_terms_scores_zero() {
        let data = sample_index();
        let ranked = rank(&data, &candidates(&[0, 1]), &[]);
        assert!(ranked.iter().all(|&(_, s)| s == 0.0));
    }

    // ── Best-term selection ────────────────────────────────────────────

    #[test]
    fn test_best_term_prefers_higher_z() {
        let data = sample_index();
        // For doc1 (internal 1), "recession" (1 of 1 corpus-wide) is more
        // over-represented than "economy" (1 of 2).
        let terms = vec!["economy".to_string(), "recession".to_string()];
        assert_eq!(best_term(&data, 1, &terms), Some("recession"));
    }

    #[test]
    fn test_best_term_tie_keeps_first() {
        let data = sample_index();
        let terms = vec!["economy".to_string(), "growth".to_string()];
        assert_eq!(best_term(&data, 0, &terms), Some("economy"));
    }

    #[test]
    fn test_best_term_empty_terms() {
        let data = sample_index();
        assert_eq!(best_term(&data, 0, &[]), None);
    }
}
