//! Executor abstraction over the model runner.

use async_trait::async_trait;

use crate::error::OllamaError;

use super::subprocess::OllamaRunner;

/// Trait for running completions against a local model runner.
///
/// This abstraction allows mocking the Ollama subprocess in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionExecutor: Send + Sync {
    /// Verify the runner binary is available.
    async fn check_installed(&self) -> Result<(), OllamaError>;

    /// Run the model with the given prompt and return the trimmed response.
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, OllamaError>;
}

#[async_trait]
impl CompletionExecutor for OllamaRunner {
    async fn check_installed(&self) -> Result<(), OllamaError> {
        OllamaRunner::check_installed(self)
    }

    async fn complete(&self, model: &str, prompt: &str) -> Result<String, OllamaError> {
        OllamaRunner::complete(self, model, prompt).await
    }
}
