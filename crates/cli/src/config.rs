//! `erd.toml` configuration
//!
//! ```toml
//! log_level = "info"
//!
//! [generator]
//! include_comments = true
//! output = "schema.sql"
//! ```
//!
//! Every key is optional. Without a file the defaults apply.

use erd_codegen::GeneratorConfig;
use erd_core::{ErdError, ErdResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File looked up in the working directory when `--config` is not given
pub const CONFIG_FILE_NAME: &str = "erd.toml";

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log filter used when neither `RUST_LOG` nor `-v` is given
    pub log_level: String,

    pub generator: GeneratorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist. Otherwise `erd.toml` in the working
    /// directory is used when present, and the defaults when not.
    pub fn load(path: Option<&Path>) -> ErdResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(CONFIG_FILE_NAME).is_file() => Self::from_file(CONFIG_FILE_NAME),
            None => Ok(Self::default()),
        }
    }

    /// Read and parse a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> ErdResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ErdError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> ErdResult<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> ErdResult<()> {
        let level = self.log_level.trim();
        if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) && !level.contains('=') {
            return Err(ErdError::InvalidConfig(format!(
                "unknown log_level '{}', expected one of {} or a filter directive",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        if self.generator.output.as_os_str().is_empty() {
            return Err(ErdError::InvalidConfig(
                "generator.output cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
