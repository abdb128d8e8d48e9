//! Execution Engine
//!
//! The recursive dispatcher over the operator tree:
//!
//! eval_session -> eval -> run_simple / run_in_parallel / run_on_pipe
//!
//! `eval` is a pure function of its subtree with no hidden state, so the
//! orchestrator can re-enter it identically inside a freshly forked child
//! for the `&` and `|` branches.

use tracing::debug;

use crate::ast::types::{CommandTree, Operator};
use crate::interpreter::process::{run_in_parallel, run_on_pipe};
use crate::interpreter::simple_command::run_simple;
use crate::interpreter::types::Status;
use crate::interpreter::word_expansion::expand_word;

/// Session-level entry point.
///
/// `None` stands for a malformed/absent tree from the driver and yields the
/// termination sentinel as a defensive fallback.
pub fn eval_session(tree: Option<&CommandTree>) -> Status {
    match tree {
        Some(tree) => eval(tree),
        None => Status::Exit,
    }
}

/// Evaluate a command tree and compose the statuses of its subtrees.
///
/// Composition rules:
/// - `;` runs both sides and returns the bitwise OR of their statuses, so
///   failure bits from either side survive.
/// - `&&` / `||` short-circuit on the left status.
/// - `&` returns the success sentinel once both sides have terminated.
/// - `|` returns the right stage's status.
/// - `exit`/`quit` anywhere along the in-process evaluation path raises the
///   session-termination sentinel, which absorbs through every operator.
pub fn eval(tree: &CommandTree) -> Status {
    match tree {
        CommandTree::Simple(cmd) => {
            let verb = expand_word(&cmd.verb);
            if matches!(verb.as_str(), "exit" | "quit") {
                return Status::Exit;
            }
            run_simple(cmd)
        }
        CommandTree::Op { op, left, right } => {
            debug!(%op, "evaluating composite node");
            match op {
                Operator::Sequential => {
                    let lhs = eval(left);
                    if lhs.is_exit() {
                        // exit on the left ends the whole session; the
                        // right subtree never runs.
                        return Status::Exit;
                    }
                    lhs | eval(right)
                }
                Operator::AndThen => match eval(left) {
                    Status::Exit => Status::Exit,
                    Status::Code(0) => eval(right),
                    failed => failed,
                },
                Operator::OrElse => match eval(left) {
                    Status::Exit => Status::Exit,
                    ok @ Status::Code(0) => ok,
                    _ => eval(right),
                },
                Operator::Parallel => run_in_parallel(left, right),
                Operator::Pipe => run_on_pipe(left, right),
            }
        }
    }
}
