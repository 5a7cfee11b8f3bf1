//! Repository check and staged diff extraction.
//!
//! Both operations shell out to the system `git` binary, so they see exactly
//! what the user's own `git` would (config, hooks, attributes).

use std::io;
use std::path::Path;
use std::process::{Command, Output};

use tracing::debug;

use crate::error::GitError;

/// Verify that `dir` is inside a git working tree.
///
/// Runs `git rev-parse --is-inside-work-tree`. A non-zero exit, or any answer
/// other than `true` (e.g. when run from inside `.git/`), means we are not in
/// a working tree.
pub fn check_inside_work_tree(dir: &Path) -> Result<(), GitError> {
    let output = run_git(dir, &["rev-parse", "--is-inside-work-tree"])?;

    if !output.status.success() {
        debug!(
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "git rev-parse failed"
        );
        return Err(GitError::NotARepository);
    }

    if String::from_utf8_lossy(&output.stdout).trim() != "true" {
        return Err(GitError::NotARepository);
    }

    Ok(())
}

/// Get the staged (index) diff as raw text.
///
/// An empty string means nothing is staged; deciding whether that is an
/// error is left to the caller.
pub fn staged_diff(dir: &Path) -> Result<String, GitError> {
    let output = run_git(dir, &["diff", "--cached"])?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let code = output
            .status
            .code()
            .map_or("unknown status".to_string(), |c| format!("exit code {c}"));
        return Err(GitError::DiffUnavailable(format!(
            "git diff --cached failed with {}: {}",
            code,
            stderr.trim()
        )));
    }

    let diff = String::from_utf8_lossy(&output.stdout).into_owned();
    debug!(bytes = diff.len(), "collected staged diff");
    Ok(diff)
}

/// Run a git command in `dir` and capture its output.
fn run_git(dir: &Path, args: &[&str]) -> Result<Output, GitError> {
    run_program("git", dir, args)
}

fn run_program(program: &str, dir: &Path, args: &[&str]) -> Result<Output, GitError> {
    Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| {
            // A missing working directory is also reported as NotFound.
            if e.kind() == io::ErrorKind::NotFound && dir.is_dir() {
                GitError::NotInstalled(e)
            } else {
                GitError::SpawnFailed(e)
            }
        })
}
