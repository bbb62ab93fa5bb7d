//! # ERD Builder Codegen
//!
//! Derives SQL from the schema graph.
//!
//! - [`ddl`]: the pure MySQL/InnoDB DDL projection
//! - [`generator`]: [`DdlGenerator`], which applies a [`GeneratorConfig`] and
//!   packages the result as a [`GeneratedFile`] ready to be written out

// ============================================================================
// Modules
// ============================================================================

pub mod ddl;
pub mod generator;

// ============================================================================
// Re-exports
// ============================================================================

pub use ddl::{DdlOptions, generate_ddl};
pub use generator::{DdlGenerator, GenerationSummary};

use erd_core::{ErdError, ErdResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the generated schema
pub const DEFAULT_OUTPUT_FILE: &str = "schema.sql";

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Configuration for the DDL generator
///
/// Read from the `[generator]` table of `erd.toml`; every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Emit column comments
    pub include_comments: bool,

    /// Where `generate` writes when asked to save, relative to the working directory
    pub output: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            include_comments: true,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output file
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    /// Disable column comments
    pub fn without_comments(mut self) -> Self {
        self.include_comments = false;
        self
    }

    /// Rendering options derived from this configuration
    pub fn ddl_options(&self) -> DdlOptions {
        DdlOptions {
            include_comments: self.include_comments,
        }
    }
}

// ============================================================================
// GeneratedFile
// ============================================================================

/// A single generated file
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    /// Target path
    pub path: PathBuf,

    /// File content
    pub content: String,
}

impl GeneratedFile {
    /// Create a new generated file
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Create a SQL file
    pub fn sql(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content)
    }

    /// Size of the content in bytes
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Write the file, relative paths resolved against `base_dir`
    ///
    /// Parent directories are created as needed. Returns the full path written.
    pub fn write_to_disk(&self, base_dir: impl AsRef<Path>) -> ErdResult<PathBuf> {
        let full_path = base_dir.as_ref().join(&self.path);

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ErdError::FileWrite {
                    path: parent.to_path_buf(),
                    message: e.to_string(),
                })?;
            }
        }

        std::fs::write(&full_path, &self.content).map_err(|e| ErdError::FileWrite {
            path: full_path.clone(),
            message: e.to_string(),
        })?;

        Ok(full_path)
    }
}

// ============================================================================
// Tests
// ============================================================================
