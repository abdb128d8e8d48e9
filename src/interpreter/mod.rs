//! Interpreter module
//!
//! This module contains the command-tree interpreter: word expansion,
//! argument-vector building, simple-command execution, process
//! orchestration for `&` and `|`, and the recursive tree evaluator.

pub mod argv;
pub mod errors;
pub mod execution_engine;
pub mod process;
pub mod redirections;
pub mod simple_command;
pub mod types;
pub mod word_expansion;

pub use argv::*;
pub use errors::*;
pub use execution_engine::*;
pub use process::*;
pub use redirections::*;
pub use simple_command::*;
pub use types::*;
pub use word_expansion::*;
