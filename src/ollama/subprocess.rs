//! Ollama CLI spawning.

use std::env;
use std::ffi::OsString;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::OllamaError;

/// Name of the Ollama binary looked up on PATH.
pub const OLLAMA_BIN: &str = "ollama";

/// Default timeout for Ollama subprocess execution (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Environment variable to override the default timeout.
const TIMEOUT_ENV_VAR: &str = "CMT_TIMEOUT";

/// Get the configured timeout duration.
///
/// Reads from CMT_TIMEOUT environment variable if set,
/// otherwise uses the default of 300 seconds.
///
/// Logs a warning if the environment variable is set but contains
/// an invalid value (non-numeric, negative, or zero).
fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// Handle on the Ollama CLI.
#[derive(Debug, Clone)]
pub struct OllamaRunner {
    program: OsString,
    timeout: Duration,
}

impl OllamaRunner {
    /// Runner for `ollama` on PATH with the configured timeout.
    pub fn new() -> Self {
        Self {
            program: OsString::from(OLLAMA_BIN),
            timeout: get_timeout(),
        }
    }

    /// Use a different program name or path instead of `ollama`.
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Bound each completion by `timeout` instead of the configured one.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The bound applied to each completion.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check that the Ollama binary can be located.
    ///
    /// Uses the `which` crate for cross-platform executable detection, so a
    /// bare name is searched on PATH and an explicit path must be executable.
    pub fn check_installed(&self) -> Result<(), OllamaError> {
        which::which(&self.program).map_err(|_| OllamaError::NotInstalled)?;
        Ok(())
    }

    /// Run `ollama run <model> <prompt>` and return the trimmed response.
    ///
    /// # Timeout
    ///
    /// The subprocess is bounded by the runner's timeout (default 5 minutes,
    /// configurable via `CMT_TIMEOUT`). The child is spawned with
    /// `kill_on_drop`, so when the timeout fires the process is killed rather
    /// than left running in the background.
    pub async fn complete(&self, model: &str, prompt: &str) -> Result<String, OllamaError> {
        if model.trim().is_empty() {
            return Err(OllamaError::EmptyModel);
        }

        debug!(model, prompt_bytes = prompt.len(), "running ollama");

        let output = timeout(
            self.timeout,
            Command::new(&self.program)
                .arg("run")
                .arg(model)
                .arg(prompt)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| OllamaError::Timeout(self.timeout))?
        .map_err(OllamaError::SpawnFailed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            return Err(OllamaError::NonZeroExit { code, stderr });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.trim().to_string())
    }
}

impl Default for OllamaRunner {
    fn default() -> Self {
        Self::new()
    }
}
