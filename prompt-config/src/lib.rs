//! Configuration management for promptdesk.
//!
//! Values are layered: built-in defaults, then an optional JSON file, then
//! `PROMPTDESK_*` environment variables. Command-line flags are applied on top
//! by the binary.

#![warn(missing_docs, clippy::pedantic)]

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use prompt_store::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application directory name under the platform data/config directories.
pub const APP_DIR: &str = "promptdesk";

/// Environment variable overriding [`DeskConfig::data_dir`].
pub const ENV_DATA_DIR: &str = "PROMPTDESK_DATA_DIR";
/// Environment variable overriding [`DeskConfig::storage_key`].
pub const ENV_STORAGE_KEY: &str = "PROMPTDESK_STORAGE_KEY";
/// Environment variable overriding [`DeskConfig::clipboard_command`]; the
/// value is split on whitespace.
pub const ENV_CLIPBOARD: &str = "PROMPTDESK_CLIPBOARD";
/// Environment variable overriding [`DeskConfig::log_filter`].
pub const ENV_LOG: &str = "PROMPTDESK_LOG";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Source [`std::io::Error`].
        source: std::io::Error,
    },
    /// The configuration file is not valid JSON for [`DeskConfig`].
    #[error("failed to parse config: {source}")]
    Parse {
        /// Source [`serde_json::Error`].
        #[from]
        source: serde_json::Error,
    },
    /// A value failed validation.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Offending field name.
        field: &'static str,
        /// Human-readable reason for rejection.
        reason: &'static str,
    },
}

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Runtime configuration of a promptdesk session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeskConfig {
    /// Directory holding the prompt storage file.
    pub data_dir: PathBuf,
    /// Name of the storage entry holding the serialized collection.
    pub storage_key: String,
    /// Command (program and arguments) that receives copied text on stdin.
    pub clipboard_command: Vec<String>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            clipboard_command: default_clipboard_command(),
            log_filter: "warn".to_owned(),
        }
    }
}

impl DeskConfig {
    /// Loads configuration from `path` (or the default config file when it
    /// exists) and applies environment overrides.
    ///
    /// The result is not validated: callers layer their own overrides on top
    /// and call [`DeskConfig::validate`] last.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an explicitly requested file is missing or
    /// unreadable, or when any file fails to parse.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    /// Like [`DeskConfig::load`], resolving overrides through `lookup`
    /// instead of the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`DeskConfig::load`].
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) => Self::from_optional_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_overrides(lookup);
        Ok(config)
    }

    /// Parses a JSON document; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed input or unknown fields.
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is malformed.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    fn from_optional_file(path: &Path) -> ConfigResult<Self> {
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_json_str(&raw),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Applies `PROMPTDESK_*` overrides resolved through `lookup`. Empty
    /// values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(dir) = value(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(key) = value(ENV_STORAGE_KEY) {
            self.storage_key = key.trim().to_owned();
        }
        if let Some(command) = value(ENV_CLIPBOARD) {
            self.clipboard_command = command.split_whitespace().map(str::to_owned).collect();
        }
        if let Some(filter) = value(ENV_LOG) {
            self.log_filter = filter;
        }
    }

    /// Checks that the configuration can be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an empty storage key, a key that
    /// looks like a path, or an empty clipboard command.
    pub fn validate(&self) -> ConfigResult<()> {
        let key = self.storage_key.trim();
        if key.is_empty() {
            return Err(ConfigError::Invalid {
                field: "storage_key",
                reason: "must not be empty",
            });
        }
        if key == "." || key == ".." || key.contains(['/', '\\']) {
            return Err(ConfigError::Invalid {
                field: "storage_key",
                reason: "must be a plain name, not a path",
            });
        }
        if self
            .clipboard_command
            .first()
            .is_none_or(|program| program.trim().is_empty())
        {
            return Err(ConfigError::Invalid {
                field: "clipboard_command",
                reason: "must name a program",
            });
        }
        Ok(())
    }
}

/// Returns the default config file location, when the platform has one.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".promptdesk"), |dir| dir.join(APP_DIR))
}

fn default_clipboard_command() -> Vec<String> {
    let command: &[&str] = if cfg!(target_os = "macos") {
        &["pbcopy"]
    } else if cfg!(windows) {
        &["clip"]
    } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        &["wl-copy"]
    } else {
        &["xclip", "-selection", "clipboard"]
    };
    command.iter().map(|part| (*part).to_owned()).collect()
}
