//! Immutable word tables.
//!
//! The lexicon is the only process-wide vocabulary: articles,
//! prepositions, quantifier keywords, and yes/no words. The mutable
//! indexes (noun dictionary, verb dictionary) are owned by the world
//! and the verb registry respectively.

/// Articles stripped from object phrases.
pub const ARTICLES: &[&str] = &["the", "a", "an"];

/// Prepositions the parser recognizes. A verb form must declare the
/// prepositions it consumes; an undeclared preposition in the input
/// eliminates the candidate.
pub const PREPOSITIONS: &[&str] = &[
    "in", "out", "up", "down", "on", "under", "over", "through", "at", "across", "with", "off",
    "around", "to", "about", "from", "into", "onto", "using",
];

/// Quantifier keywords ("take all").
pub const KEYWORDS: &[&str] = &["all", "everything"];

/// Affirmative answers to a yes/no query.
pub const YES: &[&str] = &["yes", "y"];

/// Negative answers to a yes/no query.
pub const NO: &[&str] = &["no", "n"];

/// Lowercases a raw line and strips punctuation.
///
/// Apostrophes vanish (so "don't" reads as "dont"); all other
/// punctuation becomes whitespace so token boundaries survive.
#[must_use]
pub fn clean_input(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\'' => {}
            c if c.is_alphanumeric() || c.is_whitespace() => {
                out.extend(c.to_lowercase());
            }
            _ => out.push(' '),
        }
    }
    out
}

/// Drops articles token-by-token, preserving the order of everything
/// else.
#[must_use]
pub fn remove_articles(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| !ARTICLES.contains(&t.as_str()))
        .cloned()
        .collect()
}

/// True if the word is a recognized preposition.
#[must_use]
pub fn is_preposition(word: &str) -> bool {
    PREPOSITIONS.contains(&word)
}

/// True if the word is a quantifier keyword.
#[must_use]
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}
