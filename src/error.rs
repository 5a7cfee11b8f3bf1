//! Error types for cmt modules using thiserror.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git is not installed: {0}")]
    NotInstalled(#[source] std::io::Error),

    #[error("Failed to run git: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("This is not a Git repository. Please run this command inside a Git repository")]
    NotARepository,

    #[error("Failed to get staged diff: {0}")]
    DiffUnavailable(String),
}

/// Errors from Ollama CLI operations.
#[derive(Error, Debug)]
pub enum OllamaError {
    #[error("Ollama is not installed. Install it from https://ollama.com")]
    NotInstalled,

    #[error("No model specified. Set `model` in the config file or pass --model")]
    EmptyModel,

    #[error("Failed to spawn Ollama process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Ollama process timed out after {0:?}")]
    Timeout(Duration),

    #[error("Ollama exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },
}

/// Errors from loading or creating the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory for the config file")]
    NoHomeDir,

    #[error("Failed to read config file {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to create config file {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the progress indicator.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SpinnerError {
    #[error("Spinner has already been started")]
    AlreadyStarted,
}

/// Errors from commit message generation.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error(transparent)]
    RunnerUnavailable(OllamaError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error("No staged changes found. Please stage your changes using 'git add' first")]
    NoStagedChanges,

    #[error("Failed to generate commit message: {0}")]
    CompletionFailed(#[source] OllamaError),

    #[error(transparent)]
    Spinner(#[from] SpinnerError),
}
