//! Redirection Handling
//!
//! Opens redirection targets and wires them onto the standard streams of a
//! freshly forked child with `dup2`.

use std::fs::{File, OpenOptions};
use std::os::fd::AsRawFd;

use libc::{STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO};
use nix::unistd::dup2;

use crate::ast::types::{RedirectMode, SimpleCommand};
use crate::interpreter::errors::ExecError;
use crate::interpreter::word_expansion::expand_word;

/// Open an output or error redirection target.
///
/// The file is created if missing; `Truncate` discards existing content,
/// `Append` positions writes at the end.
pub fn open_redirect(path: &str, mode: RedirectMode) -> Result<File, ExecError> {
    let mut opts = OpenOptions::new();
    opts.write(true).create(true);
    match mode {
        RedirectMode::Truncate => {
            opts.truncate(true);
        }
        RedirectMode::Append => {
            opts.append(true);
        }
    }
    opts.open(path).map_err(|source| ExecError::Redirect {
        path: path.to_string(),
        source,
    })
}

/// Open an input redirection target, always read-only.
pub fn open_input(path: &str) -> Result<File, ExecError> {
    File::open(path).map_err(|source| ExecError::Redirect {
        path: path.to_string(),
        source,
    })
}

fn dup_onto(file: &File, stream_fd: i32) -> Result<(), ExecError> {
    dup2(file.as_raw_fd(), stream_fd)
        .map(|_| ())
        .map_err(|source| ExecError::Dup {
            fd: stream_fd,
            source,
        })
}

/// Wire a simple command's redirections onto the current process's
/// standard streams. Meant to run inside the forked child, before exec.
///
/// Input is attached first, so an input failure aborts the child before any
/// output target is created. If the output and error targets expand to the
/// same path, the file is opened once (with the error stream's mode) and
/// that single descriptor serves both fd 1 and fd 2 — two independent opens
/// would race each other's truncation.
pub fn apply_redirections(cmd: &SimpleCommand) -> Result<(), ExecError> {
    if let Some(input) = &cmd.input {
        let file = open_input(&expand_word(input))?;
        dup_onto(&file, STDIN_FILENO)?;
    }

    let out_path = cmd.output.as_ref().map(expand_word);
    let err_path = cmd.error.as_ref().map(expand_word);

    match (out_path, err_path) {
        (Some(out), Some(err)) if out == err => {
            let file = open_redirect(&err, cmd.error_mode)?;
            dup_onto(&file, STDOUT_FILENO)?;
            dup_onto(&file, STDERR_FILENO)?;
        }
        (out, err) => {
            if let Some(path) = out {
                let file = open_redirect(&path, cmd.output_mode)?;
                dup_onto(&file, STDOUT_FILENO)?;
            }
            if let Some(path) = err {
                let file = open_redirect(&path, cmd.error_mode)?;
                dup_onto(&file, STDERR_FILENO)?;
            }
        }
    }

    Ok(())
}
