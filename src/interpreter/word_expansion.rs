//! Word Expansion
//!
//! Resolves a word's fragment chain into a single string value.
//!
//! Only environment-variable substitution and literal concatenation are
//! performed here; quoting, globbing and tilde expansion are out of scope
//! for this core.

use crate::ast::types::{Word, WordPart};

/// Expand a word into its final string value.
///
/// Walks the fragment chain left to right: literal fragments contribute
/// their text, variable fragments contribute the variable's value from the
/// process environment. An unset variable contributes the empty string —
/// that is shell policy, never an error. An empty chain expands to `""`.
///
/// The fold is pure, so re-expanding a word always yields the same string
/// (given an unchanged environment).
pub fn expand_word(word: &Word) -> String {
    let mut result = String::new();
    for part in &word.parts {
        match part {
            WordPart::Literal(text) => result.push_str(text),
            WordPart::Variable(name) => {
                if let Ok(value) = std::env::var(name) {
                    result.push_str(&value);
                }
            }
        }
    }
    result
}

/// Expand a fragment slice the same way [`expand_word`] expands a whole
/// word. Used for the value sub-chain of a `NAME=VALUE` assignment verb.
pub fn expand_parts(parts: &[WordPart]) -> String {
    let mut result = String::new();
    for part in parts {
        match part {
            WordPart::Literal(text) => result.push_str(text),
            WordPart::Variable(name) => {
                if let Ok(value) = std::env::var(name) {
                    result.push_str(&value);
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::types::Word;

    #[test]
    fn test_empty_chain_expands_to_empty_string() {
        assert_eq!(expand_word(&Word::default()), "");
    }

    #[test]
    fn test_literal_concatenation_preserves_order() {
        let word = Word::from_parts(vec![
            WordPart::Literal("a".to_string()),
            WordPart::Literal("b".to_string()),
            WordPart::Literal("c".to_string()),
        ]);
        assert_eq!(expand_word(&word), "abc");
    }

    #[test]
    fn test_unset_variable_is_empty_not_an_error() {
        let word = Word::from_parts(vec![
            WordPart::Literal("pre".to_string()),
            WordPart::Variable("MINISH_TEST_DEFINITELY_UNSET".to_string()),
            WordPart::Literal("post".to_string()),
        ]);
        assert_eq!(expand_word(&word), "prepost");
    }

    #[test]
    fn test_variable_substitution() {
        std::env::set_var("MINISH_TEST_EXPAND", "xyz");
        let word = Word::from_parts(vec![
            WordPart::Literal("1".to_string()),
            WordPart::Variable("MINISH_TEST_EXPAND".to_string()),
            WordPart::Literal("2".to_string()),
        ]);
        assert_eq!(expand_word(&word), "1xyz2");
    }

    #[test]
    fn test_expansion_is_idempotent() {
        std::env::set_var("MINISH_TEST_IDEMPOTENT", "same");
        let word = Word::from_parts(vec![
            WordPart::Variable("MINISH_TEST_IDEMPOTENT".to_string()),
            WordPart::Literal("-tail".to_string()),
        ]);
        let first = expand_word(&word);
        let second = expand_word(&word);
        assert_eq!(first, second);
        assert_eq!(first, "same-tail");
    }

    #[test]
    fn test_expand_parts_matches_word_expansion() {
        let parts = vec![
            WordPart::Literal("x".to_string()),
            WordPart::Variable("MINISH_TEST_UNSET_PARTS".to_string()),
        ];
        assert_eq!(
            expand_parts(&parts),
            expand_word(&Word::from_parts(parts.clone()))
        );
    }
}
