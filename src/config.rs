//! Settings file handling and model resolution.
//!
//! The settings file is a small YAML document with a single `model` key. It
//! lives at `~/.cmt.yaml` unless `--config` points elsewhere, and is created
//! with defaults the first time it is looked up and found missing.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::ConfigError;

/// Model used when nothing else is configured.
pub const DEFAULT_MODEL: &str = "llama3.1";

/// File name of the settings file in the home directory.
pub const SETTINGS_FILE_NAME: &str = ".cmt.yaml";

/// Persisted user settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub model: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Settings {
    /// The configured model, or the default when the file leaves it blank.
    pub fn model(&self) -> &str {
        let model = self.model.trim();
        if model.is_empty() { DEFAULT_MODEL } else { model }
    }
}

/// Settings read from disk, and whether they had to be created.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub path: PathBuf,
    pub created: bool,
}

/// Outcome of model resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    pub model: String,
    /// Set when resolution wrote a fresh settings file.
    pub created_config: Option<PathBuf>,
}

/// Path of the settings file in the user's home directory.
pub fn default_settings_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(SETTINGS_FILE_NAME))
}

/// Read settings from `path`, creating the file with defaults if it is missing.
///
/// A file that exists but does not parse is an error; it is never replaced.
/// An empty file yields the defaults.
pub fn load_or_create(path: &Path) -> Result<LoadedSettings, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let settings = Settings::default();
            write_settings(path, &settings)?;
            return Ok(LoadedSettings {
                settings,
                path: path.to_path_buf(),
                created: true,
            });
        }
        Err(source) => {
            return Err(ConfigError::ReadFailed {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let settings = parse_settings(&content).map_err(|source| ConfigError::ParseFailed {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), model = %settings.model, "loaded settings");

    Ok(LoadedSettings {
        settings,
        path: path.to_path_buf(),
        created: false,
    })
}

/// Resolve the model to use.
///
/// Precedence: `model_override` > settings at `config_path` > settings at
/// `~/.cmt.yaml` > [`DEFAULT_MODEL`]. With an override the settings file is
/// neither read nor created. The override is trimmed but otherwise passed
/// through, so a blank one reaches the runner and fails there as
/// `EmptyModel` rather than silently falling back to the file.
pub fn resolve_model(
    model_override: Option<&str>,
    config_path: Option<&Path>,
) -> Result<ResolvedModel, ConfigError> {
    if let Some(model) = model_override {
        return Ok(ResolvedModel {
            model: model.trim().to_string(),
            created_config: None,
        });
    }

    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => default_settings_path()?,
    };

    let loaded = load_or_create(&path)?;
    Ok(ResolvedModel {
        model: loaded.settings.model().to_string(),
        created_config: loaded.created.then_some(loaded.path),
    })
}

fn parse_settings(content: &str) -> Result<Settings, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(content)
}

/// Atomically write `settings` to `path`, creating parent directories.
fn write_settings(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let write_failed = |source: io::Error| ConfigError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let yaml = serde_yaml::to_string(settings)
        .map_err(|e| write_failed(io::Error::new(io::ErrorKind::InvalidData, e)))?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(write_failed)?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(write_failed)?;
    tmp.write_all(yaml.as_bytes()).map_err(write_failed)?;
    tmp.persist(path).map_err(|e| write_failed(e.error))?;

    debug!(path = %path.display(), "created settings file");
    Ok(())
}
