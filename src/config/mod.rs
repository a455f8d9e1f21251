//! config
//!
//! Application configuration loading and persistence.
//!
//! # Locations
//!
//! Searched in order:
//! 1. An explicit path (`qd interactive --config <path>`)
//! 2. `$QUARTERDECK_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/quarterdeck/config.toml`
//! 4. `~/.quarterdeck/config.toml` (canonical write location)
//!
//! A missing file is not an error: defaults apply and a later save creates
//! the file. A file that exists but does not parse is a real error.
//!
//! # Example
//!
//! ```no_run
//! use quarterdeck::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("history goes to {}", config.history_file().display());
//! println!("keeping {} entries", config.max_history());
//! ```

pub mod schema;

pub use schema::ConfigFile;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shell::history::DEFAULT_MAX_HISTORY;

/// Environment variable overriding the config file location.
const CONFIG_ENV: &str = "QUARTERDECK_CONFIG";

/// Prompt used when the file does not set one.
const DEFAULT_PROMPT: &str = "qd> ";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration plus the path it came from (and saves back to).
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents (all fields optional).
    file: ConfigFile,
    /// Path this config was loaded from, or will be written to.
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// `override_path` takes precedence over every other location; if the
    /// file there does not exist, defaults apply and a later [`save`]
    /// targets that path.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read,
    /// parsed, or validated. Missing files are not an error.
    ///
    /// [`save`]: Config::save
    pub fn load(override_path: Option<&Path>) -> Result<Config, ConfigError> {
        let (file, path) = match Self::locate(override_path) {
            Some(path) if path.exists() => (Self::read_file(&path)?, Some(path)),
            Some(path) => (ConfigFile::default(), Some(path)),
            None => (ConfigFile::default(), None),
        };

        file.validate()?;

        Ok(Config { file, path })
    }

    /// Resolve the config path without touching the filesystem contents.
    ///
    /// Prefers, in order: the explicit override, `$QUARTERDECK_CONFIG`,
    /// an existing XDG file, and finally the canonical home location.
    fn locate(override_path: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = override_path {
            return Some(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("quarterdeck/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir().map(|home| home.join(".quarterdeck/config.toml"))
    }

    /// Read and parse a config file.
    fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Write the configuration back to its file atomically.
    ///
    /// Creates parent directories if needed. Uses atomic write
    /// (write to temp file, then rename) to prevent corruption.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => {
                let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
                home.join(".quarterdeck/config.toml")
            }
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.clone(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(&self.file).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, &path).map_err(|e| ConfigError::WriteError {
            path: path.clone(),
            source: e,
        })?;

        Ok(path)
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Path where command history is persisted.
    ///
    /// Defaults to `~/.quarterdeck/history`.
    pub fn history_file(&self) -> PathBuf {
        match &self.file.history_file {
            Some(path) => path.clone(),
            None => dirs::home_dir()
                .map(|home| home.join(".quarterdeck/history"))
                .unwrap_or_else(|| PathBuf::from(".quarterdeck_history")),
        }
    }

    /// Maximum number of history entries retained.
    ///
    /// Defaults to 100.
    pub fn max_history(&self) -> usize {
        self.file.max_history.unwrap_or(DEFAULT_MAX_HISTORY)
    }

    /// Prompt shown by the interactive console.
    pub fn prompt(&self) -> &str {
        self.file.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }

    /// Path this config was loaded from, if any file location resolved.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
