//! Path-compressed (Patricia) trie mapping terms to document-id sets.
//!
//! Each edge carries a multi-character label; chains of single-child nodes are
//! merged so the node count stays proportional to the vocabulary, not to the
//! total character count. Terminal nodes hold the set of internal document ids
//! containing that exact term. Documents are identified by internal u32 ids
//! for memory efficiency; the id mapping lives in [`crate::index::store`].

use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// A single trie node. The root carries an empty label; every other node's
/// label is non-empty and starts with the character it is keyed under in its
/// parent's child map.
#[derive(Debug, Default, Serialize, Deserialize)]
struct TrieNode {
    /// Edge label leading into this node.
    label: String,
    /// Children keyed by the first character of their label. Labels of
    /// siblings are pairwise distinct in their first character.
    children: HashMap<char, TrieNode>,
    /// Internal ids of documents containing the term spelled by the path to
    /// this node. Non-empty iff `terminal`.
    docs: HashSet<u32>,
    /// Whether the path to this node spells a complete indexed term.
    terminal: bool,
}

/// Outcome of a read-only descent along a word.
enum Descent<'a> {
    /// The word was consumed exactly at a node boundary.
    Exact(&'a TrieNode),
    /// The word ended strictly inside this child's edge label.
    InEdge(&'a TrieNode),
    /// A character mismatch or missing child key ended the descent.
    Miss,
}

/// Compact trie storing the inverted index: term → set of internal doc ids.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CompactTrie {
    root: TrieNode,
    /// Number of distinct terms stored.
    term_count: usize,
}

/// Byte length of the longest common character-aligned prefix of `a` and `b`.
fn common_prefix_len(a: &str, b: &str) -> usize {
    let mut len = 0;
    for (ac, bc) in a.chars().zip(b.chars()) {
        if ac != bc {
            break;
        }
        len += ac.len_utf8();
    }
    len
}

impl CompactTrie {
    /// Creates an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct terms in the trie.
    pub fn len(&self) -> usize {
        self.term_count
    }

    /// Returns `true` if no terms have been inserted.
    pub fn is_empty(&self) -> bool {
        self.term_count == 0
    }

    /// Registers `doc` under `term` (case-folded). Idempotent as set
    /// membership: repeat insertion of the same (term, doc) pair is absorbed.
    /// An empty term is a no-op.
    pub fn insert(&mut self, term: &str, doc: u32) {
        if term.is_empty() {
            return;
        }
        let term = term.to_lowercase();
        if insert_at(&mut self.root, &term, doc) {
            self.term_count += 1;
        }
    }

    /// Returns the documents containing exactly `term`, or an empty set if
    /// the term is absent, is only a non-terminal prefix, or ends strictly
    /// inside an edge label.
    pub fn search(&self, term: &str) -> HashSet<u32> {
        if term.is_empty() {
            return HashSet::new();
        }
        let term = term.to_lowercase();
        match self.descend(&term) {
            Descent::Exact(node) if node.terminal => node.docs.clone(),
            _ => HashSet::new(),
        }
    }

    /// Returns the union of document sets over every term starting with
    /// `prefix`. An empty prefix yields an empty set.
    pub fn starts_with(&self, prefix: &str) -> HashSet<u32> {
        if prefix.is_empty() {
            return HashSet::new();
        }
        let prefix = prefix.to_lowercase();
        match self.descend(&prefix) {
            Descent::Exact(node) | Descent::InEdge(node) => {
                let mut out = HashSet::new();
                collect_docs(node, &mut out);
                out
            }
            Descent::Miss => HashSet::new(),
        }
    }

    /// Returns `true` if `term` is stored in the trie.
    pub fn contains(&self, term: &str) -> bool {
        !self.search(term).is_empty()
    }

    /// Returns every stored (term, doc set) pair. Order is unspecified.
    pub fn terms(&self) -> Vec<(String, HashSet<u32>)> {
        let mut out = Vec::new();
        collect_terms(&self.root, String::new(), &mut out);
        out
    }

    /// Walks the trie along `word` without mutation, failing as soon as a
    /// character mismatch or missing child key occurs.
    fn descend(&self, word: &str) -> Descent<'_> {
        let mut node = &self.root;
        let mut rest = word;
        while let Some(first) = rest.chars().next() {
            let Some(child) = node.children.get(&first) else {
                return Descent::Miss;
            };
            let lcp = common_prefix_len(&child.label, rest);
            if lcp == child.label.len() {
                node = child;
                rest = &rest[lcp..];
            } else if lcp == rest.len() {
                return Descent::InEdge(child);
            } else {
                return Descent::Miss;
            }
        }
        Descent::Exact(node)
    }
}

/// A fresh terminal node holding `label`, seeded with `doc`.
fn terminal_node(label: &str, doc: u32) -> TrieNode {
    let mut node = TrieNode {
        label: label.to_string(),
        ..TrieNode::default()
    };
    node.terminal = true;
    node.docs.insert(doc);
    node
}

/// Recursive insertion of `suffix` below `node`. Returns `true` if a term
/// that was not previously stored became terminal.
fn insert_at(node: &mut TrieNode, suffix: &str, doc: u32) -> bool {
    let Some(first) = suffix.chars().next() else {
        // Suffix fully consumed: this node spells the term.
        let new_term = !node.terminal;
        node.terminal = true;
        node.docs.insert(doc);
        return new_term;
    };

    match node.children.entry(first) {
        Entry::Vacant(slot) => {
            // No child shares the first character: attach the whole remainder.
            slot.insert(terminal_node(suffix, doc));
            true
        }
        Entry::Occupied(mut slot) => {
            let child = slot.get_mut();
            let lcp = common_prefix_len(&child.label, suffix);
            if lcp == child.label.len() {
                // Child label fully consumed: keep descending with the remainder.
                return insert_at(child, &suffix[lcp..], doc);
            }

            // Partial match: split the edge. The shared prefix becomes an
            // intermediate node and the existing child keeps its unmatched
            // remainder.
            let mut old = std::mem::take(child);
            let shared = old.label[..lcp].to_string();
            let remainder = old.label[lcp..].to_string();
            let mut mid = TrieNode {
                label: shared,
                ..TrieNode::default()
            };
            if let Some(old_first) = remainder.chars().next() {
                old.label = remainder;
                mid.children.insert(old_first, old);
            }

            if lcp == suffix.len() {
                // The inserted term ends exactly at the split point.
                mid.terminal = true;
                mid.docs.insert(doc);
            } else {
                let rest = &suffix[lcp..];
                if let Some(rest_first) = rest.chars().next() {
                    mid.children.insert(rest_first, terminal_node(rest, doc));
                }
            }

            *child = mid;
            true
        }
    }
}

fn collect_docs(node: &TrieNode, out: &mut HashSet<u32>) {
    if node.terminal {
        out.extend(node.docs.iter().copied());
    }
    for child in node.children.values() {
        collect_docs(child, out);
    }
}

fn collect_terms(node: &TrieNode, prefix: String, out: &mut Vec<(String, HashSet<u32>)>) {
    let mut word = prefix;
    word.push_str(&node.label);
    if node.terminal {
        out.push((word.clone(), node.docs.clone()));
    }
    for child in node.children.values() {
        collect_terms(child, word.clone(), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[u32]) -> HashSet<u32> {
        ids.iter().copied().collect()
    }

    // ── Insert / search ────────────────────────────────────────────────

    #[test]
    fn test_insert_then_search() {
        let mut trie = CompactTrie::new();
        trie.insert("economy", 1);
        trie.insert("economy", 2);
        assert_eq!(trie.search("economy"), set(&[1, 2]));
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut trie = CompactTrie::new();
        trie.insert("market", 7);
        trie.insert("market", 7);
        assert_eq!(trie.search("market"), set(&[7]));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_insert_case_folds() {
        let mut trie = CompactTrie::new();
        trie.insert("Growth", 3);
        assert_eq!(trie.search("growth"), set(&[3]));
        assert_eq!(trie.search("GROWTH"), set(&[3]));
    }

    #[test]
    fn test_search_absent_term() {
        let mut trie = CompactTrie::new();
        trie.insert("economy", 1);
        assert!(trie.search("recession").is_empty());
    }

    #[test]
    fn test_empty_term_is_noop() {
        let mut trie = CompactTrie::new();
        trie.insert("", 1);
        assert!(trie.is_empty());
        assert!(trie.search("").is_empty());
        assert!(trie.starts_with("").is_empty());
    }

    // ── Edge splitting ─────────────────────────────────────────────────

    #[test]
    fn test_split_invariant() {
        let mut trie = CompactTrie::new();
        trie.insert("casa", 1);
        trie.insert("casar", 2);
        trie.insert("cabo", 3);
        assert_eq!(trie.search("casa"), set(&[1]));
        assert_eq!(trie.search("casar"), set(&[2]));
        assert!(trie.search("cab").is_empty(), "non-terminal prefix");
        assert_eq!(trie.starts_with("ca"), set(&[1, 2, 3]));
    }

    #[test]
    fn test_prefix_term_after_longer_term() {
        // "casar" first, then "casa": the existing edge must split and the
        // intermediate node becomes terminal.
        let mut trie = CompactTrie::new();
        trie.insert("casar", 2);
        trie.insert("casa", 1);
        assert_eq!(trie.search("casa"), set(&[1]));
        assert_eq!(trie.search("casar"), set(&[2]));
    }

    #[test]
    fn test_term_ending_inside_edge_is_not_found() {
        let mut trie = CompactTrie::new();
        trie.insert("casar", 2);
        assert!(trie.search("casa").is_empty());
        assert_eq!(trie.starts_with("casa"), set(&[2]));
    }

    #[test]
    fn test_term_count_tracks_distinct_terms() {
        let mut trie = CompactTrie::new();
        trie.insert("casa", 1);
        trie.insert("casar", 2);
        trie.insert("cabo", 3);
        trie.insert("casa", 9);
        assert_eq!(trie.len(), 3);
    }

    // ── Prefix queries ─────────────────────────────────────────────────

    #[test]
    fn test_starts_with_every_prefix_of_inserted_term() {
        let mut trie = CompactTrie::new();
        trie.insert("economy", 4);
        let term = "economy";
        for end in 1..=term.len() {
            assert!(
                trie.starts_with(&term[..end]).contains(&4),
                "prefix {:?} should reach doc 4",
                &term[..end]
            );
        }
    }

    #[test]
    fn test_starts_with_missing_path() {
        let mut trie = CompactTrie::new();
        trie.insert("economy", 4);
        assert!(trie.starts_with("x").is_empty());
        assert!(trie.starts_with("economyx").is_empty());
    }

    #[test]
    fn test_terms_lists_everything() {
        let mut trie = CompactTrie::new();
        trie.insert("casa", 1);
        trie.insert("casar", 2);
        trie.insert("cabo", 3);
        let mut words: Vec<String> = trie.terms().into_iter().map(|(w, _)| w).collect();
        words.sort();
        assert_eq!(words, vec!["cabo", "casa", "casar"]);
    }

    // ── Serialization ──────────────────────────────────────────────────

    #[test]
    fn test_serialize_round_trip_preserves_results() {
        let mut trie = CompactTrie::new();
        for (i, word) in ["casa", "casar", "cabo", "economy", "economic", "eco"]
            .iter()
            .enumerate()
        {
            trie.insert(word, i as u32);
        }

        let bytes = bincode::serialize(&trie).expect("serialize");
        let restored: CompactTrie = bincode::deserialize(&bytes).expect("deserialize");

        assert_eq!(restored.len(), trie.len());
        for (word, docs) in trie.terms() {
            assert_eq!(restored.search(&word), docs);
        }
        assert_eq!(restored.starts_with("eco"), trie.starts_with("eco"));
        assert_eq!(restored.starts_with("cas"), trie.starts_with("cas"));
        assert!(restored.search("cas").is_empty());
    }
}
