//! config::schema
//!
//! On-disk configuration schema.
//!
//! All fields are optional; defaults are applied by the accessor methods on
//! [`crate::config::Config`]. Unknown fields are rejected so a typo in the
//! file surfaces as a parse error instead of being silently ignored.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path where command history is persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_file: Option<PathBuf>,

    /// Maximum number of history entries retained.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_history: Option<usize>,

    /// Prompt shown by the interactive console.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl ConfigFile {
    /// Validate field values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history == Some(0) {
            return Err(ConfigError::InvalidValue(
                "max_history must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
