//! DDL generator
//!
//! Wraps [`generate_ddl`] with a [`GeneratorConfig`], logs what was produced
//! and packages the document as a [`GeneratedFile`].

use crate::ddl::generate_ddl;
use crate::{GeneratedFile, GeneratorConfig};
use erd_core::{ErdResult, Validatable};
use erd_ir::SchemaStore;
use std::path::{Path, PathBuf};

/// Generator producing `schema.sql` from a store
#[derive(Debug, Clone, Default)]
pub struct DdlGenerator {
    config: GeneratorConfig,
}

impl DdlGenerator {
    /// Create a new generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default())
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Render the store as a SQL file at the configured output path
    ///
    /// Never fails. Validation problems are logged as warnings and left for
    /// the database to reject.
    pub fn generate(&self, store: &SchemaStore) -> GeneratedFile {
        for problem in store.validation_errors() {
            tracing::warn!("schema validation warning: {}", problem);
        }

        let content = generate_ddl(store, &self.config.ddl_options());
        let file = GeneratedFile::sql(&self.config.output, content);

        tracing::info!(
            tables = store.entity_count(),
            bytes = file.size(),
            "ddl generation complete",
        );
        file
    }

    /// Generate and write the file, relative to `base_dir`
    pub fn generate_and_write(
        &self,
        store: &SchemaStore,
        base_dir: impl AsRef<Path>,
    ) -> ErdResult<(GeneratedFile, PathBuf)> {
        let file = self.generate(store);
        let path = file.write_to_disk(base_dir)?;
        tracing::info!(path = %path.display(), "schema written to disk");
        Ok((file, path))
    }
}

// ============================================================================
// GenerationSummary
// ============================================================================

/// Counts reported after a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub tables: usize,
    pub columns: usize,
    pub primary_keys: usize,
    pub foreign_keys: usize,
    /// Foreign-key columns whose reference is incomplete and were written as plain columns
    pub skipped_foreign_keys: usize,
}

impl GenerationSummary {
    pub fn from_store(store: &SchemaStore) -> Self {
        let attributes = || store.entities().iter().flat_map(|e| e.attributes.iter());
        Self {
            tables: store.entity_count(),
            columns: attributes().count(),
            primary_keys: store
                .entities()
                .iter()
                .filter(|e| !e.primary_keys().is_empty())
                .count(),
            foreign_keys: attributes().filter(|a| a.has_resolved_fk()).count(),
            skipped_foreign_keys: attributes().filter(|a| a.is_dangling_fk()).count(),
        }
    }
}

impl std::fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} tables, {} columns, {} primary keys, {} foreign keys",
            self.tables, self.columns, self.primary_keys, self.foreign_keys
        )?;
        if self.skipped_foreign_keys > 0 {
            write!(f, " ({} incomplete skipped)", self.skipped_foreign_keys)?;
        }
        Ok(())
    }
}
