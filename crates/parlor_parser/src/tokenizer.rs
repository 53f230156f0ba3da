//! Input tokenization.
//!
//! Converts raw player input into an ordered token stream. Token order
//! is preserved everywhere downstream; the parser reasons positionally.

use crate::lexicon::clean_input;

/// Tokenizes a raw input line.
///
/// - Lowercases words
/// - Strips punctuation
/// - Splits on whitespace
#[must_use]
pub fn tokenize(input: &str) -> Vec<String> {
    clean_input(input)
        .split_whitespace()
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_simple() {
        assert_eq!(tokenize("take sword"), vec!["take", "sword"]);
    }

    #[test]
    fn tokenize_lowercases() {
        assert_eq!(tokenize("Take SWORD"), vec!["take", "sword"]);
    }

    #[test]
    fn tokenize_strips_punctuation() {
        assert_eq!(tokenize("take sword!"), vec!["take", "sword"]);
        assert_eq!(
            tokenize("unlock box, with key."),
            vec!["unlock", "box", "with", "key"]
        );
    }

    #[test]
    fn tokenize_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }
}
