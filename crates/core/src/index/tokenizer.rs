//! Case-folding alphanumeric tokenizer.
//!
//! Tokenizes text by lowercasing and splitting on non-alphanumeric characters;
//! every maximal alphanumeric run becomes a term. No stop words and no stemming —
//! the indexed vocabulary is exactly what appears in the corpus. Uses a
//! zero-per-token allocation design via byte spans.

/// Tokenized text: owns the lowercased buffer, provides &str slices via byte spans.
/// Only 1 heap allocation (the lowercased String) instead of N per-token Strings.
pub struct Tokens {
    buffer: String,
    spans: Vec<(u32, u32)>, // (start, end) byte offsets into buffer
}

impl Tokens {
    /// Returns an iterator over the token `&str` slices.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.spans
            .iter()
            .map(|&(s, e)| &self.buffer[s as usize..e as usize])
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns `true` if there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Tokenize text: lowercase, split on non-alphanumeric runs.
/// Returns a Tokens struct that owns the lowercased buffer. Zero per-token allocation.
pub fn tokenize(text: &str) -> Tokens {
    let buffer = text.to_lowercase();
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in buffer.char_indices() {
        if c.is_alphanumeric() {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start {
            spans.push((s as u32, i as u32));
            start = None;
        }
    }
    // Handle last token (no trailing separator)
    if let Some(s) = start {
        spans.push((s as u32, buffer.len() as u32));
    }

    Tokens { buffer, spans }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        tokenize(text).iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_tokenize_lowercases() {
        assert_eq!(words("The Quick BROWN Fox"), vec!["the", "quick", "brown", "fox"]);
    }

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        assert_eq!(
            words("oil-price shock; markets fall."),
            vec!["oil", "price", "shock", "markets", "fall"]
        );
    }

    #[test]
    fn test_tokenize_keeps_digits_and_short_tokens() {
        assert_eq!(words("GDP grew 2% in Q1"), vec!["gdp", "grew", "2", "in", "q1"]);
    }

    #[test]
    fn test_tokenize_empty_and_separator_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" .,;!? \n\t").is_empty());
    }

    #[test]
    fn test_tokenize_counts_repeats() {
        let tokens = tokenize("tax tax tax");
        assert_eq!(tokens.len(), 3);
    }
}
