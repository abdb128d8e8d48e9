//! Simple Command Execution
//!
//! Runs one leaf of the command tree: the `cd` builtin and `NAME=VALUE`
//! assignments mutate the current process, everything else runs in a
//! forked child (including the `pwd` builtin, so its output picks up the
//! same redirections an external command would).

use std::path::Path;

use nix::unistd::{chdir, execvp, fork, getcwd, ForkResult};
use tracing::debug;

use crate::ast::types::{SimpleCommand, WordPart};
use crate::interpreter::argv::build_argv;
use crate::interpreter::process::{child_exit, wait_child};
use crate::interpreter::redirections::{apply_redirections, open_redirect};
use crate::interpreter::types::Status;
use crate::interpreter::word_expansion::{expand_parts, expand_word};

/// Execute a simple command and return its status.
///
/// Dispatch order: `cd`, then the structural assignment form, then
/// fork/exec for everything else.
pub fn run_simple(cmd: &SimpleCommand) -> Status {
    let verb = expand_word(&cmd.verb);

    if verb == "cd" {
        return builtin_cd(cmd);
    }
    if let Some((name, value_parts)) = cmd.as_assignment() {
        return assign_variable(name, value_parts);
    }

    run_in_child(cmd, &verb)
}

/// `cd` mutates the shell's own working directory, so it never forks.
fn builtin_cd(cmd: &SimpleCommand) -> Status {
    // A redirection operator applies even to builtins: the target file is
    // created/touched although cd itself writes nothing.
    if let Some(output) = &cmd.output {
        match open_redirect(&expand_word(output), cmd.output_mode) {
            Ok(file) => drop(file),
            Err(err) => {
                eprintln!("minish: cd: {}", err);
                return Status::FAILURE;
            }
        }
    }

    let Some(target) = cmd.params.first() else {
        // No path parameter is a no-op success.
        return Status::OK;
    };

    let path = expand_word(target);
    match chdir(Path::new(&path)) {
        Ok(()) => Status::OK,
        Err(err) => {
            eprintln!("minish: cd: {}: {}", path, err);
            Status::FAILURE
        }
    }
}

/// Set an environment variable in the current process, overwriting any
/// existing binding. Visible to everything forked afterwards in this
/// lineage, never retroactively to running siblings.
fn assign_variable(name: &str, value_parts: &[WordPart]) -> Status {
    let value = expand_parts(value_parts);
    // std::env::set_var panics on these instead of failing.
    if name.contains('=') || name.contains('\0') || value.contains('\0') {
        eprintln!("minish: invalid assignment to '{}'", name);
        return Status::FAILURE;
    }
    debug!(name, "setting environment variable");
    std::env::set_var(name, value);
    Status::OK
}

fn run_in_child(cmd: &SimpleCommand, verb: &str) -> Status {
    debug!(verb, "spawning command");
    match unsafe { fork() } {
        Ok(ForkResult::Child) => exec_child(cmd, verb),
        Ok(ForkResult::Parent { child }) => wait_child(child),
        Err(err) => {
            eprintln!("minish: fork failed: {}", err);
            Status::FAILURE
        }
    }
}

/// Child side of a simple command: wire redirections, then either run the
/// in-process `pwd` builtin or replace the image with the external program.
/// Never returns; every path ends in `_exit`.
fn exec_child(cmd: &SimpleCommand, verb: &str) -> ! {
    if let Err(err) = apply_redirections(cmd) {
        eprintln!("minish: {}", err);
        child_exit(1);
    }

    let argv = match build_argv(verb, &cmd.params) {
        Ok(argv) => argv,
        Err(err) => {
            eprintln!("minish: {}", err);
            child_exit(1);
        }
    };

    if verb == "pwd" {
        match getcwd() {
            Ok(dir) => {
                // Write straight to the stdout descriptor: println! goes
                // through the test harness's output capture, which would
                // divert the bytes away from fd 1 and the redirection
                // wired above.
                let line = format!("{}\n", dir.display());
                let _ = nix::unistd::write(std::io::stdout(), line.as_bytes());
                child_exit(0);
            }
            Err(err) => {
                eprintln!("minish: pwd: {}", err);
                child_exit(1);
            }
        }
    }

    // execvp only returns on failure.
    let program = argv[0].clone();
    let _ = execvp(&program, &argv);
    eprintln!("Execution failed for '{}'", verb);
    child_exit(127);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::types::{RedirectMode, Word};

    #[test]
    fn test_cd_to_nonexistent_path_fails_and_keeps_cwd() {
        let before = std::env::current_dir().unwrap();
        let cmd = SimpleCommand::new(
            Word::literal("cd"),
            vec![Word::literal("/minish-no-such-directory")],
        );
        assert_eq!(run_simple(&cmd), Status::FAILURE);
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_cd_without_parameter_is_noop_success() {
        let before = std::env::current_dir().unwrap();
        let cmd = SimpleCommand::new(Word::literal("cd"), vec![]);
        assert_eq!(run_simple(&cmd), Status::OK);
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_cd_redirection_touches_target_without_forking() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("touched");
        let cmd = SimpleCommand {
            verb: Word::literal("cd"),
            output: Some(Word::literal(path.to_str().unwrap())),
            output_mode: RedirectMode::Truncate,
            ..SimpleCommand::default()
        };
        assert_eq!(run_simple(&cmd), Status::OK);
        assert!(path.exists());
    }

    #[test]
    fn test_cd_redirection_open_failure_is_hard_error() {
        let cmd = SimpleCommand {
            verb: Word::literal("cd"),
            output: Some(Word::literal("/no/such/dir/out")),
            ..SimpleCommand::default()
        };
        assert_eq!(run_simple(&cmd), Status::FAILURE);
    }

    #[test]
    fn test_assignment_sets_variable_in_current_process() {
        let cmd = SimpleCommand::new(
            Word::assignment(
                "MINISH_TEST_ASSIGN",
                vec![WordPart::Literal("abc".to_string())],
            ),
            vec![],
        );
        assert_eq!(run_simple(&cmd), Status::OK);
        assert_eq!(std::env::var("MINISH_TEST_ASSIGN").unwrap(), "abc");

        // Overwrite the existing binding.
        let cmd = SimpleCommand::new(
            Word::assignment(
                "MINISH_TEST_ASSIGN",
                vec![WordPart::Literal("def".to_string())],
            ),
            vec![],
        );
        assert_eq!(run_simple(&cmd), Status::OK);
        assert_eq!(std::env::var("MINISH_TEST_ASSIGN").unwrap(), "def");
    }

    #[test]
    fn test_assignment_value_may_substitute_other_variables() {
        std::env::set_var("MINISH_TEST_SRC", "hello");
        let cmd = SimpleCommand::new(
            Word::assignment(
                "MINISH_TEST_DST",
                vec![
                    WordPart::Variable("MINISH_TEST_SRC".to_string()),
                    WordPart::Literal("-world".to_string()),
                ],
            ),
            vec![],
        );
        assert_eq!(run_simple(&cmd), Status::OK);
        assert_eq!(std::env::var("MINISH_TEST_DST").unwrap(), "hello-world");
    }

    #[test]
    fn test_invalid_assignment_is_rejected() {
        let cmd = SimpleCommand::new(
            Word::assignment(
                "MINISH_TEST_NUL",
                vec![WordPart::Literal("a\0b".to_string())],
            ),
            vec![],
        );
        assert_eq!(run_simple(&cmd), Status::FAILURE);
    }
}
