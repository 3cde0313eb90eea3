//! Context-window snippet extraction with term highlighting.
//!
//! The snippet shows the query term most over-represented in the document
//! (highest z-score, first-encountered on ties) inside a fixed-radius
//! character window, with ellipsis markers exactly on the sides where the
//! body was clipped and the matched occurrence wrapped in highlight markers.

use crate::config;
use crate::index::store::IndexData;
use crate::rank::scorer::best_term;

/// Builds a highlighted snippet for one document, or `None` if the document
/// id is unknown. Falls back to a prefix of the body when no query term
/// occurs in it.
pub fn generate_snippet(data: &IndexData, doc_id: &str, terms: &[String]) -> Option<String> {
    let internal = data.id_to_internal.get(doc_id).copied()?;
    let doc = data.documents.get(doc_id)?;
    let body = doc.body.as_str();
    let radius = config::SNIPPET_RADIUS_CHARS;

    let found = best_term(data, internal, terms)
        .and_then(|term| find_term_ci(body, term));
    let Some((match_start, match_end)) = found else {
        return Some(prefix_snippet(body, radius));
    };

    // Window: `radius` characters on each side of the match, clipped to the
    // body. Offsets are kept on char boundaries.
    let snip_start = body[..match_start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(match_start);
    let clipped_left = snip_start > 0;

    let (snip_end, clipped_right) = match body[match_end..].char_indices().nth(radius) {
        Some((off, _)) => (match_end + off, true),
        None => (body.len(), false),
    };

    let mut snippet = String::with_capacity(snip_end - snip_start + 32);
    if clipped_left {
        snippet.push_str(config::SNIPPET_ELLIPSIS);
    }
    snippet.push_str(&body[snip_start..match_start]);
    snippet.push_str(config::SNIPPET_MARK_OPEN);
    snippet.push_str(&body[match_start..match_end]);
    snippet.push_str(config::SNIPPET_MARK_CLOSE);
    snippet.push_str(&body[match_end..snip_end]);
    if clipped_right {
        snippet.push_str(config::SNIPPET_ELLIPSIS);
    }
    Some(snippet)
}

/// Fallback when no query term occurs in the body: a fixed-length prefix
/// (twice the window radius) with a trailing ellipsis marker.
fn prefix_snippet(body: &str, radius: usize) -> String {
    let end = body
        .char_indices()
        .nth(radius * 2)
        .map(|(i, _)| i)
        .unwrap_or(body.len());
    format!("{}{}", &body[..end], config::SNIPPET_ELLIPSIS)
}

/// First case-insensitive occurrence of `term` (already case-folded) in
/// `text`, as a byte range.
fn find_term_ci(text: &str, term: &str) -> Option<(usize, usize)> {
    if term.is_empty() {
        return None;
    }
    for (start, _) in text.char_indices() {
        if let Some(end) = match_at(text, start, term) {
            return Some((start, end));
        }
    }
    None
}

/// If `term` matches at byte offset `start` under char-wise case folding,
/// returns the byte offset one past the matched text. A term ending inside
/// a multi-char fold of a single source character is not a match.
fn match_at(text: &str, start: usize, term: &str) -> Option<usize> {
    let mut want = term.chars().peekable();
    for (i, c) in text[start..].char_indices() {
        if want.peek().is_none() {
            return Some(start + i);
        }
        for folded in c.to_lowercase() {
            match want.next() {
                Some(w) if w == folded => {}
                _ => return None,
            }
        }
    }
    if want.peek().is_none() {
        Some(text.len())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::store::IndexData;

    const RADIUS: usize = config::SNIPPET_RADIUS_CHARS;

    fn index_with_body(body: &str) -> IndexData {
        let mut data = IndexData::new();
        data.add_document("cat", "doc.txt", &format!("Title\n{}", body), "p");
        data
    }

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    // ── Matching ───────────────────────────────────────────────────────

    #[test]
    fn test_find_term_ci_basic() {
        assert_eq!(find_term_ci("The Economy rose", "economy"), Some((4, 11)));
        assert_eq!(find_term_ci("nothing here", "economy"), None);
        assert_eq!(find_term_ci("tail match", "match"), Some((5, 10)));
    }

    #[test]
    fn test_find_term_ci_first_occurrence() {
        let text = "tax reform and tax cuts";
        assert_eq!(find_term_ci(text, "tax"), Some((0, 3)));
    }

    // ── Windowing ──────────────────────────────────────────────────────

    #[test]
    fn test_snippet_clipped_on_both_sides() {
        let body = format!("{} economy {}", "x".repeat(200), "y".repeat(200));
        let data = index_with_body(&body);
        let snip = generate_snippet(&data, "cat/doc.txt", &terms(&["economy"])).expect("snippet");
        assert!(snip.starts_with(config::SNIPPET_ELLIPSIS));
        assert!(snip.ends_with(config::SNIPPET_ELLIPSIS));
        assert!(snip.contains("<mark>economy</mark>"));
        // The 80-char window holds 79 x's plus the separating space.
        assert!(snip.contains(&"x".repeat(RADIUS - 1)));
        assert!(snip.contains(&"y".repeat(RADIUS - 1)));
        assert!(!snip.contains(&"x".repeat(RADIUS)));
    }

    #[test]
    fn test_snippet_match_near_start_clips_right_only() {
        let body = format!("economy {}", "y".repeat(300));
        let data = index_with_body(&body);
        let snip = generate_snippet(&data, "cat/doc.txt", &terms(&["economy"])).expect("snippet");
        assert!(snip.starts_with("<mark>economy</mark>"));
        assert!(snip.ends_with(config::SNIPPET_ELLIPSIS));
    }

    #[test]
    fn test_snippet_short_body_has_no_ellipsis() {
        let data = index_with_body("a short economy note");
        let snip = generate_snippet(&data, "cat/doc.txt", &terms(&["economy"])).expect("snippet");
        assert_eq!(snip, "a short <mark>economy</mark> note");
    }

    #[test]
    fn test_snippet_preserves_original_casing() {
        let data = index_with_body("The Economy rose sharply");
        let snip = generate_snippet(&data, "cat/doc.txt", &terms(&["economy"])).expect("snippet");
        assert!(snip.contains("<mark>Economy</mark>"));
    }

    // ── Fallback ───────────────────────────────────────────────────────

    #[test]
    fn test_snippet_fallback_when_term_absent_from_body() {
        // "headline" is indexed nowhere in the body of this doc.
        let data = index_with_body("plain words without the query term");
        let snip = generate_snippet(&data, "cat/doc.txt", &terms(&["headline"])).expect("snippet");
        assert_eq!(snip, format!("plain words without the query term{}", config::SNIPPET_ELLIPSIS));
    }

    #[test]
    fn test_snippet_fallback_truncates_long_body() {
        let body = "z".repeat(500);
        let data = index_with_body(&body);
        let snip = generate_snippet(&data, "cat/doc.txt", &terms(&["absent"])).expect("snippet");
        assert_eq!(snip.len(), RADIUS * 2 + config::SNIPPET_ELLIPSIS.len());
        assert!(snip.ends_with(config::SNIPPET_ELLIPSIS));
    }

    #[test]
    fn test_snippet_fallback_for_empty_terms() {
        let data = index_with_body("some body text");
        let snip = generate_snippet(&data, "cat/doc.txt", &[]).expect("snippet");
        assert!(snip.ends_with(config::SNIPPET_ELLIPSIS));
    }

    #[test]
    fn test_snippet_unknown_document() {
        let data = index_with_body("body");
        assert!(generate_snippet(&data, "cat/missing.txt", &terms(&["body"])).is_none());
    }

    // ── Term choice ────────────────────────────────────────────────────

    #[test]
    fn test_snippet_highlights_most_relevant_term() {
        let mut data = IndexData::new();
        // "rare" is concentrated in doc 0; "shared" is uniform, z-score 0.
        data.add_document("c", "a.txt", "T\nshared words then rare rare rare", "p");
        data.add_document("c", "b.txt", "T\nshared others", "p");
        let snip =
            generate_snippet(&data, "c/a.txt", &terms(&["shared", "rare"])).expect("snippet");
        assert!(snip.contains("<mark>rare</mark>"));
        assert!(!snip.contains("<mark>shared</mark>"));
    }
}
