//! Process Orchestration
//!
//! Creates and synchronizes the OS processes behind the `&` and `|`
//! operators. Each spawned child re-enters the tree evaluator on its
//! subtree and exits with that subtree's status; the parent blocks until
//! its children terminate. Pipe ends are owned fds, so every early-return
//! path closes them without leaking descriptors.

use std::io::Write;
use std::os::fd::AsRawFd;

use libc::{STDIN_FILENO, STDOUT_FILENO};
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{dup2, fork, pipe, ForkResult, Pid};
use tracing::{debug, trace};

use crate::ast::types::CommandTree;
use crate::interpreter::errors::ExecError;
use crate::interpreter::execution_engine::eval;
use crate::interpreter::types::Status;

/// Terminate a forked child without running the parent's atexit handlers
/// or flushing its duplicated buffers twice.
pub(crate) fn child_exit(code: i32) -> ! {
    let _ = std::io::stdout().flush();
    let _ = std::io::stderr().flush();
    unsafe { libc::_exit(code) }
}

/// Block until a specific child terminates and translate its wait status.
///
/// A normal exit yields its exit code; death by signal (or any other
/// termination reason) is reported as a generic failure.
pub(crate) fn wait_child(pid: Pid) -> Status {
    match waitpid(pid, None) {
        Ok(WaitStatus::Exited(_, code)) => {
            trace!(%pid, code, "child exited");
            Status::Code(code)
        }
        Ok(status) => {
            eprintln!("minish: child {} terminated abnormally: {:?}", pid, status);
            Status::FAILURE
        }
        Err(err) => {
            eprintln!("minish: wait failed for child {}: {}", pid, err);
            Status::FAILURE
        }
    }
}

/// Fork a child that evaluates `tree` and exits with its status.
fn spawn_subtree(tree: &CommandTree) -> Result<Pid, ExecError> {
    match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            let status = eval(tree);
            child_exit(status.exit_code());
        }
        Ok(ForkResult::Parent { child }) => Ok(child),
        Err(err) => Err(ExecError::Fork(err)),
    }
}

/// Run two subtrees concurrently (`left & right`).
///
/// The parent waits for both children unconditionally but does not combine
/// their exit codes; the parallel node itself reports the success sentinel,
/// only completion is observed.
pub fn run_in_parallel(left: &CommandTree, right: &CommandTree) -> Status {
    debug!("running subtrees in parallel");

    let first = match spawn_subtree(left) {
        Ok(pid) => pid,
        Err(err) => {
            eprintln!("minish: {}", err);
            return Status::FAILURE;
        }
    };

    let second = match spawn_subtree(right) {
        Ok(pid) => pid,
        Err(err) => {
            eprintln!("minish: {}", err);
            let _ = wait_child(first);
            return Status::FAILURE;
        }
    };

    let _ = wait_child(first);
    let _ = wait_child(second);
    Status::OK
}

/// Run `left | right` over one anonymous pipe.
///
/// The left child writes the pipe as its stdout, the right child reads it
/// as its stdin, the parent closes both ends as soon as the children are
/// spawned (it never touches the pipe itself) and waits for both. The
/// node's status is the right stage's status — the "status of the last
/// stage" rule.
pub fn run_on_pipe(left: &CommandTree, right: &CommandTree) -> Status {
    let (read_end, write_end) = match pipe() {
        Ok(ends) => ends,
        Err(err) => {
            // No partial pipeline: the whole node is abandoned.
            eprintln!("minish: {}", ExecError::Pipe(err));
            return Status::FAILURE;
        }
    };
    debug!("running subtrees over a pipe");

    let first = match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            drop(read_end);
            if let Err(err) = dup2(write_end.as_raw_fd(), STDOUT_FILENO) {
                eprintln!("minish: {}", ExecError::Dup { fd: STDOUT_FILENO, source: err });
                child_exit(1);
            }
            drop(write_end);
            let status = eval(left);
            child_exit(status.exit_code());
        }
        Ok(ForkResult::Parent { child }) => child,
        Err(err) => {
            eprintln!("minish: {}", ExecError::Fork(err));
            return Status::FAILURE;
        }
    };

    let second = match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            drop(write_end);
            if let Err(err) = dup2(read_end.as_raw_fd(), STDIN_FILENO) {
                eprintln!("minish: {}", ExecError::Dup { fd: STDIN_FILENO, source: err });
                child_exit(1);
            }
            drop(read_end);
            let status = eval(right);
            child_exit(status.exit_code());
        }
        Ok(ForkResult::Parent { child }) => child,
        Err(err) => {
            eprintln!("minish: {}", ExecError::Fork(err));
            drop(read_end);
            drop(write_end);
            let _ = wait_child(first);
            return Status::FAILURE;
        }
    };

    // The parent must not hold the write end open, or the right stage
    // would never observe end-of-file.
    drop(read_end);
    drop(write_end);

    let _ = wait_child(first);
    wait_child(second)
}
