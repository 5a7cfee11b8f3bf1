//! cmt - Generate conventional commit messages from staged changes using a local model.
//!
//! # Overview
//!
//! cmt reads the staged diff with `git diff --cached`, asks a model served by
//! the Ollama CLI to turn it into a Conventional Commits message, and prints
//! the suggested `git commit` command.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod ollama;
pub mod spinner;

// Re-export commonly used types
pub use commit::generate_commit_message;
pub use config::{DEFAULT_MODEL, ResolvedModel, Settings, resolve_model};
pub use error::{CommitError, ConfigError, GitError, OllamaError, SpinnerError};
pub use ollama::{CompletionExecutor, OllamaRunner};
pub use spinner::Spinner;
