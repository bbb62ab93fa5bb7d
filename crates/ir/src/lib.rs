//! # ERD Builder IR
//!
//! The schema graph behind the diagram editor: entities (tables), their
//! attributes (columns) and the relations between them, plus the store that
//! owns them and the snapshot file format.
//!
//! ## Core Concepts
//!
//! - **Entity**: a table placed on the canvas, created with an `id` key column
//! - **Attribute**: a typed column with MySQL-style flags
//! - **Relation**: a cardinality-tagged edge whose foreign-key column lives on
//!   one of its endpoints
//! - **SchemaStore**: the root container and the only place the graph changes
//!
//! ## Example
//!
//! ```rust,ignore
//! use erd_ir::prelude::*;
//!
//! let mut store = SchemaStore::new();
//! let user = store.add_entity(EntityTemplate::new("User")).id;
//! let post = store.add_entity(EntityTemplate::new("Post").at(320.0, 0.0)).id;
//! store.connect(RelationDraft::new(user, post, "1:N"));
//! ```

// Module declarations
pub mod attribute;
pub mod entity;
pub mod entity_type;
pub mod fk;
pub mod id;
pub mod relation;
pub mod sample;
pub mod serialization;
pub mod store;

// Re-export commonly used types at crate root
pub use attribute::{Attribute, AttributePatch, ForeignKeyRef, NEW_ATTRIBUTE_NAME};
pub use entity::{Entity, EntityPatch, EntityTemplate};
pub use entity_type::{
    DEFAULT_ENTITY_COLOR, DEFAULT_ENTITY_TYPE, EntityType, Locale, LocalizedName, default_palette,
};
pub use fk::fk_column_name;
pub use id::IdAllocator;
pub use relation::{Relation, RelationDraft, RelationTemplate};
pub use serialization::{
    SchemaFile, load_schema, load_schema_from_string, save_schema, save_schema_to_string,
};
pub use store::{SchemaSnapshot, SchemaStore};

// Re-export core types that are commonly used with IR
pub use erd_core::{
    AttributeId, Cardinality, CardinalityToken, EntityId, ErdError, ErdResult, Position,
    RelationId, Side, Validatable,
};

/// Current snapshot file version
pub const SCHEMA_VERSION: u32 = 1;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        Attribute, AttributePatch, Cardinality, Entity, EntityPatch, EntityTemplate, ErdError,
        ErdResult, Position, Relation, RelationDraft, RelationTemplate, SchemaStore, Side,
        Validatable,
    };
}
