//! Execution Errors
//!
//! Failure taxonomy for the execution core. None of these escape the
//! public API as errors: every one is reported on the stderr of the
//! process that hit it and converted to a failure [`Status`]
//! (or a child exit) at the boundary.
//!
//! [`Status`]: crate::interpreter::types::Status

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecError {
    /// An evaluated word contains an interior NUL byte and cannot become
    /// an exec argument.
    #[error("argument contains a NUL byte: {word:?}")]
    Argv { word: String },

    /// Opening a redirection target failed.
    #[error("cannot open '{path}': {source}")]
    Redirect {
        path: String,
        source: std::io::Error,
    },

    /// Duplicating an open descriptor onto a standard stream failed.
    #[error("cannot redirect fd {fd}: {source}")]
    Dup { fd: i32, source: nix::Error },

    /// Process duplication failed; the affected branch is abandoned.
    #[error("fork failed: {0}")]
    Fork(#[source] nix::Error),

    /// Anonymous pipe creation failed; the whole pipe node is abandoned.
    #[error("pipe creation failed: {0}")]
    Pipe(#[source] nix::Error),
}
