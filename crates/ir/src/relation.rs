//! Relation definitions between entities
//!
//! A `Relation` is a directed, cardinality-tagged edge between two entities.
//! Its foreign-key column lives on `fk_target_entity_id`. When the relation
//! was created through [`RelationDraft`] it also remembers the id of that
//! column, so removing the relation removes exactly that column.

use erd_core::{AttributeId, Cardinality, EntityId, Identifiable, RelationId, Side};
use serde::{Deserialize, Serialize};

// ============================================================================
// Relation
// ============================================================================

/// Represents a foreign-key association between two entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    /// Unique identifier for this relation
    pub id: RelationId,

    /// Source entity
    pub from: EntityId,

    /// Target entity
    pub to: EntityId,

    /// `"<from>:<to>"` with tokens `1`, `N` or `M`
    pub cardinality: String,

    #[serde(default)]
    pub label: String,

    /// Name of the foreign-key column, empty when the relation has none
    #[serde(default)]
    pub fk_column: String,

    /// Entity holding the foreign-key column
    #[serde(default)]
    pub fk_target_entity_id: Option<EntityId>,

    /// The foreign-key column itself, when the relation owns it
    #[serde(default)]
    pub fk_attribute_id: Option<AttributeId>,
}

impl Relation {
    /// Build a relation from a template
    pub fn from_template(id: RelationId, template: RelationTemplate) -> Self {
        Self {
            id,
            from: template.from,
            to: template.to,
            cardinality: template.cardinality,
            label: template.label,
            fk_column: template.fk_column,
            fk_target_entity_id: template.fk_target_entity_id,
            fk_attribute_id: template.fk_attribute_id,
        }
    }

    /// Parsed cardinality; malformed tokens read as `1`
    pub fn parsed_cardinality(&self) -> Cardinality {
        Cardinality::parse(&self.cardinality)
    }

    /// Whether the entity is the source or the target
    pub fn involves(&self, entity_id: EntityId) -> bool {
        self.from == entity_id || self.to == entity_id
    }

    /// Entity id at one end
    pub fn endpoint(&self, side: Side) -> EntityId {
        match side {
            Side::From => self.from,
            Side::To => self.to,
        }
    }

    /// Whether the relation owns its foreign-key column by id
    pub fn is_linked(&self) -> bool {
        self.fk_attribute_id.is_some()
    }

    /// Whether the relation names a foreign-key column at all
    pub fn has_fk_column(&self) -> bool {
        self.fk_attribute_id.is_some() || !self.fk_column.is_empty()
    }
}

impl Identifiable for Relation {
    fn id(&self) -> u64 {
        self.id
    }
}

// ============================================================================
// RelationTemplate
// ============================================================================

/// Everything needed to create a relation except its id
#[derive(Debug, Clone, PartialEq)]
pub struct RelationTemplate {
    pub from: EntityId,
    pub to: EntityId,
    pub cardinality: String,
    pub label: String,
    pub fk_column: String,
    pub fk_target_entity_id: Option<EntityId>,
    pub fk_attribute_id: Option<AttributeId>,
}

impl RelationTemplate {
    /// Relation without a foreign-key column
    pub fn new(from: EntityId, to: EntityId, cardinality: impl Into<String>) -> Self {
        Self {
            from,
            to,
            cardinality: cardinality.into(),
            label: String::new(),
            fk_column: String::new(),
            fk_target_entity_id: None,
            fk_attribute_id: None,
        }
    }

    /// Name the foreign-key column and the entity holding it
    pub fn with_fk(mut self, column: impl Into<String>, target: EntityId) -> Self {
        self.fk_column = column.into();
        self.fk_target_entity_id = Some(target);
        self
    }

    /// Link the foreign-key column by id
    pub fn linked_to(mut self, attribute_id: AttributeId) -> Self {
        self.fk_attribute_id = Some(attribute_id);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

// ============================================================================
// RelationDraft
// ============================================================================

/// A relation plus the foreign-key column to create for it
///
/// Submitted through [`SchemaStore::connect`](crate::SchemaStore::connect),
/// which appends the column to `fk_target_entity_id` and links the new
/// relation to it. Empty `fk_column_name` and `ref_table` are filled from
/// the referenced entity's name.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationDraft {
    pub from: EntityId,
    pub to: EntityId,
    pub cardinality: String,
    pub label: String,
    /// Entity receiving the foreign-key column
    pub fk_target_entity_id: EntityId,
    pub fk_column_name: String,
    pub fk_column_type: String,
    pub fk_column_length: String,
    pub fk_column_unsigned: bool,
    pub ref_table: String,
    pub ref_column: String,
    pub fk_nullable: bool,
}

impl RelationDraft {
    /// Draft with the column on the `to` side referencing `from.id`
    /// as `INT UNSIGNED NOT NULL`
    pub fn new(from: EntityId, to: EntityId, cardinality: impl Into<String>) -> Self {
        Self {
            from,
            to,
            cardinality: cardinality.into(),
            label: String::new(),
            fk_target_entity_id: to,
            fk_column_name: String::new(),
            fk_column_type: "INT".to_string(),
            fk_column_length: String::new(),
            fk_column_unsigned: true,
            ref_table: String::new(),
            ref_column: "id".to_string(),
            fk_nullable: false,
        }
    }

    /// Put the column on the `from` side instead
    pub fn fk_on_source(mut self) -> Self {
        self.fk_target_entity_id = self.from;
        self
    }

    pub fn with_column_type(mut self, data_type: impl Into<String>, length: impl Into<String>) -> Self {
        self.fk_column_type = data_type.into();
        self.fk_column_length = length.into();
        self
    }

    pub fn nullable(mut self) -> Self {
        self.fk_nullable = true;
        self
    }

    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.ref_table = table.into();
        self.ref_column = column.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// The entity the foreign key points at
    pub fn referenced_entity_id(&self) -> EntityId {
        if self.fk_target_entity_id == self.from {
            self.to
        } else {
            self.from
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
