//! Error types for ERD Builder
//!
//! The schema store and the projections never fail: lookup misses degrade to
//! empty values. The errors below cover the edges of the system, namely
//! snapshot files, configuration, generated artifacts and advisory validation.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for ERD Builder
#[derive(Debug, Error)]
pub enum ErdError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity validation failed
    #[error("Entity validation failed for '{entity}': {message}")]
    EntityValidation { entity: String, message: String },

    /// Attribute validation failed
    #[error("Attribute validation failed for '{entity}.{attribute}': {message}")]
    AttributeValidation {
        entity: String,
        attribute: String,
        message: String,
    },

    /// Relation validation failed
    #[error("Relation validation failed: {0}")]
    RelationValidation(String),

    // ========================================================================
    // Duplicate Errors
    // ========================================================================
    /// Duplicate entity name
    #[error("Duplicate entity name: '{0}' already exists")]
    DuplicateEntity(String),

    /// Duplicate attribute name
    #[error("Duplicate attribute name: '{attribute}' already exists in entity '{entity}'")]
    DuplicateAttribute { entity: String, attribute: String },

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid snapshot file format
    #[error("Invalid schema file format: {0}")]
    InvalidSchemaFormat(String),

    /// Snapshot written by a newer version
    #[error("Schema version mismatch: expected {expected}, found {found}")]
    SchemaVersionMismatch { expected: u32, found: u32 },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// TOML configuration could not be parsed
    #[error("Invalid configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ErdError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        ErdError::Validation(msg.into())
    }

    /// Create an entity validation error
    pub fn entity_validation(entity: impl Into<String>, msg: impl Into<String>) -> Self {
        ErdError::EntityValidation {
            entity: entity.into(),
            message: msg.into(),
        }
    }

    /// Create an attribute validation error
    pub fn attribute_validation(
        entity: impl Into<String>,
        attribute: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        ErdError::AttributeValidation {
            entity: entity.into(),
            attribute: attribute.into(),
            message: msg.into(),
        }
    }
}

/// Result type alias using ErdError
pub type ErdResult<T> = Result<T, ErdError>;

// ============================================================================
// Tests
// ============================================================================
