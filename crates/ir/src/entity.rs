//! Entity definitions for tables
//!
//! This module contains the `Entity` struct and the template/patch types used
//! to create and update entities through the schema store.

use crate::attribute::Attribute;
use crate::entity_type::{DEFAULT_ENTITY_COLOR, DEFAULT_ENTITY_TYPE, EntityType};
use erd_core::{
    AttributeId, EntityId, ErdError, ErdResult, Identifiable, Position, Validatable,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Entity
// ============================================================================

/// Represents a table on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier for this entity
    pub id: EntityId,

    /// Table name
    pub name: String,

    /// Top-left corner on the canvas
    #[serde(flatten)]
    pub position: Position,

    /// Palette tag
    pub entity_type: String,

    /// Header color, copied from the palette on creation
    pub color: String,

    #[serde(default)]
    pub description: String,

    /// Columns in DDL order
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Entity {
    /// Build an entity from a template with its seeded key column
    pub fn from_template(id: EntityId, key_id: AttributeId, template: EntityTemplate) -> Self {
        Self {
            id,
            name: template.name,
            position: template.position,
            entity_type: template.entity_type,
            color: template.color,
            description: template.description,
            attributes: vec![Attribute::primary_key(key_id)],
        }
    }

    // ========================================================================
    // Attribute management
    // ========================================================================

    /// Get an attribute by ID
    pub fn attribute(&self, attribute_id: AttributeId) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.id == attribute_id)
    }

    /// Get a mutable attribute by ID
    pub fn attribute_mut(&mut self, attribute_id: AttributeId) -> Option<&mut Attribute> {
        self.attributes.iter_mut().find(|a| a.id == attribute_id)
    }

    /// Get the first attribute with the given name
    pub fn attribute_by_name(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Position of an attribute in the column order
    pub fn attribute_index(&self, attribute_id: AttributeId) -> Option<usize> {
        erd_core::traits::position_of(&self.attributes, attribute_id)
    }

    /// Check if entity has an attribute with this name
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Get the number of attributes
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Remove an attribute by ID, keeping the order of the rest
    pub fn remove_attribute(&mut self, attribute_id: AttributeId) -> Option<Attribute> {
        let index = self.attribute_index(attribute_id)?;
        Some(self.attributes.remove(index))
    }

    /// Remove every attribute with the given name. Returns how many were removed.
    pub fn remove_attributes_named(&mut self, name: &str) -> usize {
        let before = self.attributes.len();
        self.attributes.retain(|a| a.name != name);
        before - self.attributes.len()
    }

    /// Move the attribute at `from` so it ends up at `to`
    ///
    /// A `from` outside the sequence leaves it untouched and returns `false`.
    /// A `to` past the end moves the attribute to the last slot.
    pub fn move_attribute(&mut self, from: usize, to: usize) -> bool {
        if from >= self.attributes.len() {
            return false;
        }
        let attribute = self.attributes.remove(from);
        let to = to.min(self.attributes.len());
        self.attributes.insert(to, attribute);
        true
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Primary key columns in column order
    pub fn primary_keys(&self) -> Vec<&Attribute> {
        self.attributes.iter().filter(|a| a.pk).collect()
    }

    /// Foreign key columns whose reference is filled in
    pub fn resolved_foreign_keys(&self) -> Vec<&Attribute> {
        self.attributes
            .iter()
            .filter(|a| a.has_resolved_fk())
            .collect()
    }

    /// Attribute ids in column order
    pub fn attribute_ids(&self) -> Vec<AttributeId> {
        self.attributes.iter().map(|a| a.id).collect()
    }
}

impl Identifiable for Entity {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Validatable for Entity {
    fn validate(&self) -> ErdResult<()> {
        if self.name.trim().is_empty() {
            return Err(ErdError::entity_validation(
                &self.name,
                "Entity name cannot be empty",
            ));
        }

        for attribute in &self.attributes {
            attribute.validate().map_err(|e| {
                ErdError::attribute_validation(&self.name, &attribute.name, e.to_string())
            })?;
        }

        let mut names = std::collections::HashSet::new();
        for attribute in &self.attributes {
            if !names.insert(&attribute.name) {
                return Err(ErdError::DuplicateAttribute {
                    entity: self.name.clone(),
                    attribute: attribute.name.clone(),
                });
            }
        }

        Ok(())
    }
}

// ============================================================================
// EntityTemplate
// ============================================================================

/// Everything needed to create an entity except its id and columns
#[derive(Debug, Clone, PartialEq)]
pub struct EntityTemplate {
    pub name: String,
    pub position: Position,
    pub entity_type: String,
    pub color: String,
    pub description: String,
}

impl EntityTemplate {
    /// Template of the default palette type at the origin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Position::zero(),
            entity_type: DEFAULT_ENTITY_TYPE.to_string(),
            color: DEFAULT_ENTITY_COLOR.to_string(),
            description: String::new(),
        }
    }

    /// Set the position using x, y coordinates
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// Copy the tag and default color of a palette entry
    pub fn of_type(mut self, entity_type: &EntityType) -> Self {
        self.entity_type = entity_type.id.clone();
        self.color = entity_type.color.clone();
        self
    }

    /// Override the color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

// ============================================================================
// EntityPatch
// ============================================================================

/// Partial update for an entity. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityPatch {
    pub name: Option<String>,
    pub position: Option<Position>,
    pub entity_type: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

impl EntityPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }

    pub fn entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Merge the set fields into `entity`
    pub fn apply(self, entity: &mut Entity) {
        if let Some(name) = self.name {
            entity.name = name;
        }
        if let Some(position) = self.position {
            entity.position = position;
        }
        if let Some(entity_type) = self.entity_type {
            entity.entity_type = entity_type;
        }
        if let Some(color) = self.color {
            entity.color = color;
        }
        if let Some(description) = self.description {
            entity.description = description;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_type::default_palette;

    fn entity_with(names: &[&str]) -> Entity {
        let mut entity = Entity::from_template(1, 2, EntityTemplate::new("T"));
        entity.attributes.clear();
        for (i, name) in names.iter().enumerate() {
            entity
                .attributes
                .push(Attribute::new(10 + i as u64, *name, "INT"));
        }
        entity
    }

    fn names(entity: &Entity) -> Vec<&str> {
        entity.attributes.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn test_from_template_seeds_key() {
        let palette = default_palette();
        let template = EntityTemplate::new("Order")
            .at(120.0, 80.0)
            .of_type(&palette[1])
            .with_description("orders");
        let entity = Entity::from_template(4, 5, template);

        assert_eq!(entity.id, 4);
        assert_eq!(entity.name, "Order");
        assert_eq!(entity.entity_type, "child");
        assert_eq!(entity.color, "#22c55e");
        assert_eq!(entity.position, Position::new(120.0, 80.0));
        assert_eq!(entity.attribute_count(), 1);
        assert_eq!(entity.attributes[0].id, 5);
        assert!(entity.attributes[0].pk);
    }

    #[test]
    fn test_move_attribute_forward() {
        let mut entity = entity_with(&["a", "b", "c", "d"]);
        assert!(entity.move_attribute(0, 2));
        assert_eq!(names(&entity), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_move_attribute_backward() {
        let mut entity = entity_with(&["a", "b", "c", "d"]);
        assert!(entity.move_attribute(3, 1));
        assert_eq!(names(&entity), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn test_move_attribute_out_of_range() {
        let mut entity = entity_with(&["a", "b", "c"]);
        assert!(!entity.move_attribute(3, 0));
        assert_eq!(names(&entity), vec!["a", "b", "c"]);

        assert!(entity.move_attribute(0, 99));
        assert_eq!(names(&entity), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_remove_attributes_named() {
        let mut entity = entity_with(&["user_id", "title", "user_id"]);
        assert_eq!(entity.remove_attributes_named("user_id"), 2);
        assert_eq!(names(&entity), vec!["title"]);
        assert_eq!(entity.remove_attributes_named("missing"), 0);
    }

    #[test]
    fn test_remove_attribute_keeps_order() {
        let mut entity = entity_with(&["a", "b", "c"]);
        let removed = entity.remove_attribute(11);
        assert_eq!(removed.map(|a| a.name), Some("b".to_string()));
        assert_eq!(names(&entity), vec!["a", "c"]);
        assert!(entity.remove_attribute(11).is_none());
    }

    #[test]
    fn test_primary_keys_filter_by_flag() {
        let mut entity = entity_with(&["tenant_id", "name", "id"]);
        entity.attributes[0].pk = true;
        entity.attributes[2].pk = true;
        let pks: Vec<&str> = entity
            .primary_keys()
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(pks, vec!["tenant_id", "id"]);
    }

    #[test]
    fn test_entity_validation() {
        let entity = Entity::from_template(1, 2, EntityTemplate::new("User"));
        assert!(entity.validate().is_ok());

        let mut unnamed = entity.clone();
        unnamed.name = String::new();
        assert!(unnamed.validate().is_err());

        let duplicated = entity_with(&["email", "email"]);
        assert!(matches!(
            duplicated.validate(),
            Err(ErdError::DuplicateAttribute { .. })
        ));
    }

    #[test]
    fn test_patch_merges_only_set_fields() {
        let mut entity = Entity::from_template(1, 2, EntityTemplate::new("User"));
        EntityPatch::new()
            .name("Account")
            .position(10.0, 20.0)
            .apply(&mut entity);

        assert_eq!(entity.name, "Account");
        assert_eq!(entity.position, Position::new(10.0, 20.0));
        assert_eq!(entity.entity_type, DEFAULT_ENTITY_TYPE);
        assert_eq!(entity.attribute_count(), 1);
    }
}
