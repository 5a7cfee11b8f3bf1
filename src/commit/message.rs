//! The generate pipeline: preflight, staged diff, prompt, completion.

use std::path::Path;

use tracing::debug;

use crate::error::CommitError;
use crate::git::{check_inside_work_tree, staged_diff};
use crate::ollama::{CompletionExecutor, build_prompt};
use crate::spinner::Spinner;

/// Header printed above the generated message.
pub const COMMIT_MESSAGE_HEADER: &str = "Generated commit message:";

/// Label shown next to the spinner while `model` is running.
pub fn spinner_label(model: &str) -> String {
    format!("Thinking with {} model...", model)
}

/// Generate a commit message for the changes staged in `repo_dir`.
///
/// Steps:
/// 1. Check the model runner is installed
/// 2. Check `repo_dir` is inside a git working tree
/// 3. Read the staged diff; nothing staged is an error
/// 4. Run the model with the spinner going, then stop the spinner
///
/// The runner is never invoked unless there is a non-empty diff. The returned
/// text is exactly what the executor produced.
pub async fn generate_commit_message<E>(
    repo_dir: &Path,
    model: &str,
    executor: &E,
    spinner: &mut Spinner,
) -> Result<String, CommitError>
where
    E: CompletionExecutor + ?Sized,
{
    executor
        .check_installed()
        .await
        .map_err(CommitError::RunnerUnavailable)?;

    check_inside_work_tree(repo_dir)?;

    let diff = staged_diff(repo_dir)?;
    if diff.trim().is_empty() {
        return Err(CommitError::NoStagedChanges);
    }

    let prompt = build_prompt(&diff);
    debug!(
        model,
        diff_bytes = diff.len(),
        prompt_bytes = prompt.len(),
        "requesting commit message"
    );

    spinner.start(spinner_label(model))?;
    let result = executor.complete(model, &prompt).await;
    spinner.stop();

    result.map_err(CommitError::CompletionFailed)
}
