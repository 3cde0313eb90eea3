//! Boolean query tokenizer and Shunting-Yard conversion to postfix.
//!
//! Grammar: `query := term | '(' query ')' | query 'AND' query | query 'OR' query`,
//! with AND binding tighter than OR and left-to-right association otherwise.
//! The literal uppercase words `AND` / `OR` are operators; any other
//! alphanumeric run is a case-folded term. This grammar never raises a syntax
//! error — malformed input degrades per the evaluator's tolerance rules.

use std::collections::HashSet;

/// One token of a boolean query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryToken {
    /// A case-folded search term.
    Term(String),
    /// Intersection operator, precedence 2.
    And,
    /// Union operator, precedence 1.
    Or,
    /// Opening parenthesis.
    LParen,
    /// Closing parenthesis.
    RParen,
}

fn flush_run(run: &mut String, tokens: &mut Vec<QueryToken>) {
    if run.is_empty() {
        return;
    }
    match run.as_str() {
        "AND" => tokens.push(QueryToken::And),
        "OR" => tokens.push(QueryToken::Or),
        _ => tokens.push(QueryToken::Term(run.to_lowercase())),
    }
    run.clear();
}

/// Splits a raw query into tokens: parentheses, operators, and terms.
/// Any other character is a separator.
pub fn tokenize_query(raw: &str) -> Vec<QueryToken> {
    let mut tokens = Vec::new();
    let mut run = String::new();
    for c in raw.chars() {
        if c.is_alphanumeric() {
            run.push(c);
        } else {
            flush_run(&mut run, &mut tokens);
            match c {
                '(' => tokens.push(QueryToken::LParen),
                ')' => tokens.push(QueryToken::RParen),
                _ => {}
            }
        }
    }
    flush_run(&mut run, &mut tokens);
    tokens
}

/// Converts an infix token stream to postfix (RPN) with Shunting-Yard.
///
/// An unmatched `)` pops to the nearest `(` and otherwise vanishes; unmatched
/// `(` left on the stack at end of input are dropped while the remaining
/// operators are flushed in stack order.
pub fn to_postfix(tokens: Vec<QueryToken>) -> Vec<QueryToken> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<QueryToken> = Vec::new();

    for token in tokens {
        match token {
            QueryToken::Term(_) => output.push(token),
            QueryToken::And | QueryToken::Or => {
                let prec = if token == QueryToken::And { 2 } else { 1 };
                while let Some(top) = stack.last() {
                    let top_prec = match top {
                        QueryToken::And => 2,
                        QueryToken::Or => 1,
                        _ => break,
                    };
                    if top_prec < prec {
                        break;
                    }
                    if let Some(op) = stack.pop() {
                        output.push(op);
                    }
                }
                stack.push(token);
            }
            QueryToken::LParen => stack.push(token),
            QueryToken::RParen => {
                while let Some(top) = stack.pop() {
                    if top == QueryToken::LParen {
                        break;
                    }
                    output.push(top);
                }
            }
        }
    }

    while let Some(top) = stack.pop() {
        if top != QueryToken::LParen {
            output.push(top);
        }
    }
    output
}

/// Distinct query terms in first-encountered order, operators and
/// parentheses excluded. This is what the ranker and snippet extractor see.
pub fn query_terms(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut terms = Vec::new();
    for token in tokenize_query(raw) {
        if let QueryToken::Term(term) = token {
            if seen.insert(term.clone()) {
                terms.push(term);
            }
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use QueryToken::*;

    fn term(s: &str) -> QueryToken {
        Term(s.to_string())
    }

    #[test]
    fn test_tokenize_operators_and_terms() {
        assert_eq!(
            tokenize_query("economy AND (growth OR recession)"),
            vec![term("economy"), And, LParen, term("growth"), Or, term("recession"), RParen]
        );
    }

    #[test]
    fn test_tokenize_lowercase_and_is_a_term() {
        assert_eq!(tokenize_query("war and peace"), vec![term("war"), term("and"), term("peace")]);
    }

    #[test]
    fn test_tokenize_case_folds_terms() {
        assert_eq!(tokenize_query("Economy OR Market"), vec![term("economy"), Or, term("market")]);
    }

    #[test]
    fn test_postfix_precedence() {
        // a OR b AND c  →  a b c AND OR
        let postfix = to_postfix(tokenize_query("a OR b AND c"));
        assert_eq!(postfix, vec![term("a"), term("b"), term("c"), And, Or]);
    }

    #[test]
    fn test_postfix_left_associative() {
        // a AND b AND c  →  a b AND c AND
        let postfix = to_postfix(tokenize_query("a AND b AND c"));
        assert_eq!(postfix, vec![term("a"), term("b"), And, term("c"), And]);
    }

    #[test]
    fn test_postfix_parentheses_override() {
        // (a OR b) AND c  →  a b OR c AND
        let postfix = to_postfix(tokenize_query("(a OR b) AND c"));
        assert_eq!(postfix, vec![term("a"), term("b"), Or, term("c"), And]);
    }

    #[test]
    fn test_postfix_unmatched_parens_tolerated() {
        // Stray '(' is dropped, operators still flush.
        let postfix = to_postfix(tokenize_query("(a AND b"));
        assert_eq!(postfix, vec![term("a"), term("b"), And]);
        let postfix = to_postfix(tokenize_query("a AND b)"));
        assert_eq!(postfix, vec![term("a"), term("b"), And]);
    }

    #[test]
    fn test_query_terms_distinct_in_order() {
        assert_eq!(
            query_terms("economy AND growth OR economy"),
            vec!["economy".to_string(), "growth".to_string()]
        );
        assert!(query_terms("AND OR ()").is_empty());
    }
}
