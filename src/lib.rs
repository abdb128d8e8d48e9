//! minish - the execution core of a minimal unix shell
//!
//! This library takes an already-parsed command tree and executes it with
//! real OS processes: fork/exec for external commands, anonymous pipes for
//! `|`, concurrent children for `&`, and fd-level I/O redirection.
//!
//! It is not a shell front end: lexing, parsing, prompting and job control
//! all live with the caller, which hands a [`CommandTree`] to
//! [`eval_session`] and drives the session loop on the returned [`Status`].

pub mod ast;
pub mod interpreter;

pub use ast::types::*;
pub use interpreter::execution_engine::{eval, eval_session};
pub use interpreter::types::Status;
