//! Snapshot files
//!
//! Import/export of a [`SchemaStore`] as pretty JSON wrapped with a version
//! number and an export timestamp. Loading reseeds the id allocator above the
//! highest id in the file.

use crate::{SCHEMA_VERSION, SchemaSnapshot, SchemaStore};
use chrono::{DateTime, Utc};
use erd_core::{ErdError, ErdResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Schema File Wrapper
// ============================================================================

/// Wrapper for snapshot files that includes version information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Schema version for compatibility checks
    pub schema_version: u32,

    /// When the snapshot was written
    pub exported_at: DateTime<Utc>,

    /// The diagram data
    pub schema: SchemaStore,
}

impl SchemaFile {
    /// Wrap a store, stamping the current version and time
    pub fn new(schema: SchemaStore) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            exported_at: Utc::now(),
            schema,
        }
    }
}

/// Reject files written by a newer version
fn check_version(found: u32) -> ErdResult<()> {
    if found > SCHEMA_VERSION {
        return Err(ErdError::SchemaVersionMismatch {
            expected: SCHEMA_VERSION,
            found,
        });
    }
    Ok(())
}

// ============================================================================
// Save Functions
// ============================================================================

/// Save a store to a snapshot file, creating parent directories as needed
pub fn save_schema(store: &SchemaStore, path: impl AsRef<Path>) -> ErdResult<()> {
    let path = path.as_ref();
    let json = save_schema_to_string(store).map_err(|e| ErdError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| ErdError::FileWrite {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, json).map_err(|e| ErdError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::debug!(path = %path.display(), "saved schema snapshot");
    Ok(())
}

/// Serialize a store to pretty JSON
pub fn save_schema_to_string(store: &SchemaStore) -> ErdResult<String> {
    let file = SchemaFile::new(store.clone());
    Ok(serde_json::to_string_pretty(&file)?)
}

// ============================================================================
// Load Functions
// ============================================================================

/// Load a store from a snapshot file
pub fn load_schema(path: impl AsRef<Path>) -> ErdResult<SchemaStore> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| ErdError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let store = load_schema_from_string(&json).map_err(|e| match e {
        ErdError::Json(je) => ErdError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid schema file format: {}", je),
        },
        other => other,
    })?;

    tracing::debug!(
        path = %path.display(),
        entities = store.entity_count(),
        relations = store.relation_count(),
        "loaded schema snapshot"
    );
    Ok(store)
}

/// Load a store from snapshot JSON
///
/// A bare schema object without the version wrapper is accepted as well.
/// Snapshots holding an id of `u64::MAX` are rejected, since no id would be
/// left for new items.
pub fn load_schema_from_string(json: &str) -> ErdResult<SchemaStore> {
    let mut value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(ErdError::InvalidSchemaFormat(
            "expected a JSON object".to_string(),
        ));
    }

    let schema = match value.get_mut("schema_version").map(serde_json::Value::take) {
        Some(version) => {
            check_version(serde_json::from_value(version)?)?;
            value.get_mut("schema").map(serde_json::Value::take).ok_or_else(|| {
                ErdError::InvalidSchemaFormat("missing 'schema' field".to_string())
            })?
        }
        None => value,
    };

    let snapshot: SchemaSnapshot = serde_json::from_value(schema)?;
    SchemaStore::try_from(snapshot)
}

// ============================================================================
// Tests
// ============================================================================
