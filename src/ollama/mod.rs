//! Ollama CLI integration.

pub mod executor;
pub mod prompt;
pub mod subprocess;

pub use executor::CompletionExecutor;
pub use prompt::build_prompt;
pub use subprocess::OllamaRunner;
