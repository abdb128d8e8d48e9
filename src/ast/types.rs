//! Command Tree Types
//!
//! This module defines the data model handed over by the external parser:
//! words built from literal and variable fragments, simple commands with
//! their redirection targets, and the binary operator tree combining them.
//!
//! Everything here is plain immutable data. The interpreter only reads it;
//! word values are resolved by a pure fold in
//! [`crate::interpreter::word_expansion`].

use std::fmt;

// =============================================================================
// WORDS
// =============================================================================

/// One fragment of a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordPart {
    /// Literal text (no special meaning)
    Literal(String),
    /// Substitution marker bound to an environment variable name
    Variable(String),
}

/// A word is an ordered chain of fragments forming a single token.
///
/// Fragments concatenate left-to-right into the token's final value; a
/// variable fragment whose name is unset contributes the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Word {
    pub parts: Vec<WordPart>,
}

impl Word {
    /// Build a word from a single literal fragment.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            parts: vec![WordPart::Literal(text.into())],
        }
    }

    /// Build a word from a single variable-substitution fragment.
    pub fn var(name: impl Into<String>) -> Self {
        Self {
            parts: vec![WordPart::Variable(name.into())],
        }
    }

    /// Build a word from an explicit fragment chain.
    pub fn from_parts(parts: Vec<WordPart>) -> Self {
        Self { parts }
    }

    /// Build the structural `NAME=VALUE` verb form an assignment leaf uses.
    pub fn assignment(name: impl Into<String>, value_parts: Vec<WordPart>) -> Self {
        let mut parts = vec![
            WordPart::Literal(name.into()),
            WordPart::Literal("=".to_string()),
        ];
        parts.extend(value_parts);
        Self { parts }
    }
}

// =============================================================================
// SIMPLE COMMANDS
// =============================================================================

/// Open mode for an output or error redirection target.
///
/// "No redirection" is the absence of the target word itself, not a third
/// mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectMode {
    /// `>`: truncate the file on open
    #[default]
    Truncate,
    /// `>>`: append to the file
    Append,
}

impl fmt::Display for RedirectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncate => write!(f, ">"),
            Self::Append => write!(f, ">>"),
        }
    }
}

/// A leaf invocation: builtin or external program with optional redirection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimpleCommand {
    /// Command verb; a `NAME=VALUE` fragment chain marks an assignment
    pub verb: Word,
    /// Parameter words, in argument order
    pub params: Vec<Word>,
    /// stdin redirection target (always opened read-only)
    pub input: Option<Word>,
    /// stdout redirection target
    pub output: Option<Word>,
    /// stderr redirection target
    pub error: Option<Word>,
    /// Open mode for `output`
    pub output_mode: RedirectMode,
    /// Open mode for `error`
    pub error_mode: RedirectMode,
}

impl SimpleCommand {
    /// Build a plain `verb arg...` command with no redirections.
    pub fn new(verb: Word, params: Vec<Word>) -> Self {
        Self {
            verb,
            params,
            ..Self::default()
        }
    }

    /// Detect the structural `NAME=VALUE` assignment form on the verb.
    ///
    /// The parser encodes an assignment as a verb whose fragment chain is
    /// `[Literal(name), Literal("="), value fragments...]`. Returns the
    /// variable name and the (possibly empty) value sub-chain.
    pub fn as_assignment(&self) -> Option<(&str, &[WordPart])> {
        match self.verb.parts.as_slice() {
            [WordPart::Literal(name), WordPart::Literal(eq), rest @ ..]
                if eq == "=" && !name.is_empty() =>
            {
                Some((name.as_str(), rest))
            }
            _ => None,
        }
    }
}

// =============================================================================
// OPERATOR TREE
// =============================================================================

/// Binary operator combining two subtrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `;` — run left then right unconditionally
    Sequential,
    /// `&&` — run right only if left succeeded
    AndThen,
    /// `||` — run right only if left failed
    OrElse,
    /// `&` — run both sides concurrently
    Parallel,
    /// `|` — left's stdout feeds right's stdin
    Pipe,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, ";"),
            Self::AndThen => write!(f, "&&"),
            Self::OrElse => write!(f, "||"),
            Self::Parallel => write!(f, "&"),
            Self::Pipe => write!(f, "|"),
        }
    }
}

/// A command tree node: either a simple-command leaf or an internal node
/// holding an operator and exactly two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandTree {
    Simple(SimpleCommand),
    Op {
        op: Operator,
        left: Box<CommandTree>,
        right: Box<CommandTree>,
    },
}

impl CommandTree {
    /// Wrap a simple command as a leaf.
    pub fn simple(cmd: SimpleCommand) -> Self {
        Self::Simple(cmd)
    }

    /// Combine two subtrees under an operator.
    pub fn op(op: Operator, left: CommandTree, right: CommandTree) -> Self {
        Self::Op {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}
