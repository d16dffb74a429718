//! Text normalization pipeline applied to the message column.

pub mod porter;
pub mod stopwords;

use crate::types::Token;

/// Normalize one raw message into a cleaned token string.
///
/// Steps, in order: lowercase, tokenize into alphanumeric word tokens
/// (punctuation acts as a separator and never survives), drop stopwords,
/// Porter-stem each remaining token, join with single spaces. Empty input
/// yields empty output; the function never fails.
pub fn normalize_text(text: &str) -> String {
    let tokens: Vec<Token> = text
        .to_lowercase()
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .filter(|token| !stopwords::is_stopword(token))
        .map(porter::stem)
        .collect();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_punctuation_stopwords_and_stems() {
        assert_eq!(normalize_text("I LOVE buying!!! 123 things"), "love buy 123 thing");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   !!! ..."), "");
    }

    #[test]
    fn pure_stopword_text_is_emptied() {
        assert_eq!(normalize_text("I was there and so were you"), "");
    }

    #[test]
    fn deterministic_for_identical_input() {
        let text = "WINNER!! You have WON a free entry, text WIN to 80086 now";
        assert_eq!(normalize_text(text), normalize_text(text));
    }

    #[test]
    fn stable_on_already_normalized_text() {
        // Normalized fixtures used across stage tests must be fixed points.
        for text in ["hi", "win 123", "love buy 123 thing", ""] {
            assert_eq!(normalize_text(text), text);
        }
    }

    #[test]
    fn contractions_collapse_through_stopword_tokens() {
        // "don't" splits into "don" and "t", both on the stopword list.
        assert_eq!(normalize_text("Don't stop"), "stop");
    }
}
