//! Argument Vector Building
//!
//! Turns a simple command's verb and parameter words into the argument
//! vector handed to `execvp`.

use std::ffi::CString;

use crate::ast::types::Word;
use crate::interpreter::errors::ExecError;
use crate::interpreter::word_expansion::expand_word;

/// Build the argument vector for an external command.
///
/// The first slot is the verb text, followed by every parameter word
/// expanded in source order. The NUL terminator C's `execvp` needs is
/// appended by the exec wrapper, so it does not appear here.
pub fn build_argv(verb: &str, params: &[Word]) -> Result<Vec<CString>, ExecError> {
    let mut argv = Vec::with_capacity(params.len() + 1);
    argv.push(to_c_arg(verb.to_string())?);
    for param in params {
        argv.push(to_c_arg(expand_word(param))?);
    }
    Ok(argv)
}

fn to_c_arg(text: String) -> Result<CString, ExecError> {
    CString::new(text.clone()).map_err(|_| ExecError::Argv { word: text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::types::{Word, WordPart};

    #[test]
    fn test_verb_fills_first_slot() {
        let argv = build_argv("echo", &[]).unwrap();
        assert_eq!(argv.len(), 1);
        assert_eq!(argv[0].to_str().unwrap(), "echo");
    }

    #[test]
    fn test_params_keep_source_order() {
        let argv = build_argv(
            "printf",
            &[Word::literal("%s"), Word::literal("a"), Word::literal("b")],
        )
        .unwrap();
        let texts: Vec<&str> = argv.iter().map(|a| a.to_str().unwrap()).collect();
        assert_eq!(texts, vec!["printf", "%s", "a", "b"]);
    }

    #[test]
    fn test_params_are_expanded() {
        std::env::set_var("MINISH_TEST_ARGV", "expanded");
        let argv = build_argv("echo", &[Word::var("MINISH_TEST_ARGV")]).unwrap();
        assert_eq!(argv[1].to_str().unwrap(), "expanded");
    }

    #[test]
    fn test_interior_nul_is_rejected() {
        let word = Word::from_parts(vec![WordPart::Literal("a\0b".to_string())]);
        let err = build_argv("echo", &[word]).unwrap_err();
        assert!(matches!(err, ExecError::Argv { .. }));
    }
}
