//! Command tree data model
//!
//! Types produced by the external parser and consumed read-only by the
//! interpreter.

pub mod types;

pub use types::*;
