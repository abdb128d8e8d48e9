//! Interpreter Types
//!
//! The status value threaded through tree evaluation.

use std::fmt;
use std::ops::BitOr;

/// Result of evaluating a command tree.
///
/// `Code` carries an ordinary process-style exit code (0 = success).
/// `Exit` is the session-termination sentinel raised by the `exit`/`quit`
/// builtins; it is deliberately distinct from every exit code so the
/// session driver can tell "stop the shell" apart from "command failed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Code(i32),
    Exit,
}

impl Status {
    /// Success status for builtins and composite nodes.
    pub const OK: Status = Status::Code(0);
    /// Local failure status for builtin and resource-creation errors.
    pub const FAILURE: Status = Status::Code(-1);

    /// True for `Code(0)` only; the termination sentinel is not a success.
    pub fn is_success(self) -> bool {
        matches!(self, Status::Code(0))
    }

    /// True when the session should stop processing further commands.
    pub fn is_exit(self) -> bool {
        matches!(self, Status::Exit)
    }

    /// Exit code a forked child reports for this status.
    ///
    /// The sentinel cannot cross a process boundary; a child whose subtree
    /// asked to terminate the session simply exits 0. Only the session
    /// driver in the parent can act on the sentinel.
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Code(code) => code,
            Status::Exit => 0,
        }
    }
}

impl From<i32> for Status {
    fn from(code: i32) -> Self {
        Status::Code(code)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Code(code) => write!(f, "{}", code),
            Status::Exit => write!(f, "exit"),
        }
    }
}

/// Sequential composition folds both sides' failure bits together:
/// `status(A ; B) == status(A) | status(B)`, not "status of the last
/// command". The termination sentinel absorbs.
impl BitOr for Status {
    type Output = Status;

    fn bitor(self, rhs: Status) -> Status {
        match (self, rhs) {
            (Status::Exit, _) | (_, Status::Exit) => Status::Exit,
            (Status::Code(a), Status::Code(b)) => Status::Code(a | b),
        }
    }
}
