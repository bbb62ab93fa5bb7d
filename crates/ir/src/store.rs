//! Schema graph store
//!
//! `SchemaStore` owns every entity, attribute and relation of a diagram and
//! is the only place they are mutated. Ids referencing nothing never raise:
//! lookups return `None` or an empty value and mutations become no-ops.
//!
//! Projections (DDL, connector geometry) borrow the store immutably and are
//! recomputed by the caller whenever it decides the snapshot changed.

use crate::attribute::{Attribute, AttributePatch};
use crate::entity::{Entity, EntityPatch, EntityTemplate};
use crate::entity_type::{EntityType, default_palette};
use crate::fk;
use crate::id::IdAllocator;
use crate::relation::{Relation, RelationDraft, RelationTemplate};
use erd_core::traits::max_id;
use erd_core::{
    AttributeId, Cardinality, EntityId, ErdError, ErdResult, Position, RelationId, Validatable,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// SchemaStore
// ============================================================================

/// Root container for a diagram
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SchemaSnapshot", into = "SchemaSnapshot")]
pub struct SchemaStore {
    /// Entities in creation order (also the DDL order)
    entities: Vec<Entity>,

    /// Relations in creation order
    relations: Vec<Relation>,

    /// Built-in palette
    entity_types: Vec<EntityType>,

    /// Entity highlighted in the editor
    selected_entity_id: Option<EntityId>,

    /// Whether entity cards show their type badge
    show_badges: bool,

    ids: IdAllocator,
}

impl SchemaStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            relations: Vec::new(),
            entity_types: default_palette(),
            selected_entity_id: None,
            show_badges: true,
            ids: IdAllocator::new(),
        }
    }

    /// Build a store around existing entities and relations
    ///
    /// The id allocator is seeded above every entity, attribute and relation
    /// id found in the input. Fails when one of them is `u64::MAX`.
    pub fn from_parts(entities: Vec<Entity>, relations: Vec<Relation>) -> ErdResult<Self> {
        let max_entity = max_id(&entities).unwrap_or(0);
        let max_attribute = entities
            .iter()
            .filter_map(|e| max_id(&e.attributes))
            .max()
            .unwrap_or(0);
        let max_relation = max_id(&relations).unwrap_or(0);
        let max = max_entity.max(max_attribute).max(max_relation);

        let ids = IdAllocator::seeded_above(max).ok_or_else(|| {
            ErdError::InvalidSchemaFormat(format!("id {} leaves no room for new ids", max))
        })?;
        Ok(Self::assemble(entities, relations, ids))
    }

    pub(crate) fn assemble(
        entities: Vec<Entity>,
        relations: Vec<Relation>,
        ids: IdAllocator,
    ) -> Self {
        Self {
            entities,
            relations,
            ids,
            ..Self::new()
        }
    }

    /// Issue a fresh id
    pub fn next_id(&mut self) -> u64 {
        self.ids.next_id()
    }

    // ========================================================================
    // Entity Management
    // ========================================================================

    /// Add an entity with a seeded `id` primary key column
    ///
    /// Names are not checked for uniqueness.
    pub fn add_entity(&mut self, template: EntityTemplate) -> &Entity {
        let id = self.ids.next_id();
        let key_id = self.ids.next_id();
        let entity = Entity::from_template(id, key_id, template);
        tracing::debug!(entity_id = id, name = %entity.name, "added entity");

        let index = self.entities.len();
        self.entities.push(entity);
        &self.entities[index]
    }

    /// Merge fields into an entity
    pub fn update_entity(&mut self, id: EntityId, patch: EntityPatch) {
        if let Some(entity) = self.entity_mut(id) {
            patch.apply(entity);
        }
    }

    /// Move an entity, clamping both coordinates to be non-negative
    pub fn move_entity(&mut self, id: EntityId, position: Position) {
        if let Some(entity) = self.entity_mut(id) {
            entity.position = position.clamp_non_negative();
        }
    }

    /// Remove an entity and every relation touching it
    ///
    /// Foreign-key columns that the removed relations placed on surviving
    /// entities are removed as well, the same way [`delete_relation`]
    /// removes them.
    ///
    /// [`delete_relation`]: SchemaStore::delete_relation
    pub fn delete_entity(&mut self, id: EntityId) {
        let before = self.entities.len();
        self.entities.retain(|e| e.id != id);
        if self.entities.len() == before {
            return;
        }

        let (cascaded, kept): (Vec<Relation>, Vec<Relation>) = std::mem::take(&mut self.relations)
            .into_iter()
            .partition(|r| r.involves(id));
        self.relations = kept;

        for relation in &cascaded {
            self.remove_fk_attribute(relation);
        }

        if self.selected_entity_id == Some(id) {
            self.selected_entity_id = None;
        }

        tracing::debug!(
            entity_id = id,
            relations = cascaded.len(),
            "deleted entity"
        );
    }

    /// Get an entity by ID
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable entity by ID
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Entity name, or an empty string when the id is unknown
    pub fn entity_name(&self, id: EntityId) -> &str {
        self.entity(id).map(|e| e.name.as_str()).unwrap_or("")
    }

    /// Get the first entity with the given name
    pub fn entity_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// All entities in creation order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Get the number of entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Check if the diagram is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    // ========================================================================
    // Attribute Management
    // ========================================================================

    /// Append a `new_col VARCHAR(255)` column to an entity
    pub fn add_attribute(&mut self, entity_id: EntityId) -> Option<&Attribute> {
        let index = self.entities.iter().position(|e| e.id == entity_id)?;
        let attribute = Attribute::placeholder(self.ids.next_id());
        tracing::debug!(entity_id, attribute_id = attribute.id, "added attribute");

        let entity = &mut self.entities[index];
        entity.attributes.push(attribute);
        entity.attributes.last()
    }

    /// Merge fields into an attribute
    ///
    /// Renaming a column that a relation owns by id keeps the relation's
    /// `fk_column` in step.
    pub fn update_attribute(
        &mut self,
        entity_id: EntityId,
        attribute_id: AttributeId,
        patch: AttributePatch,
    ) {
        let Some(attribute) = self
            .entity_mut(entity_id)
            .and_then(|e| e.attribute_mut(attribute_id))
        else {
            return;
        };

        patch.apply(attribute);
        let name = attribute.name.clone();

        for relation in self
            .relations
            .iter_mut()
            .filter(|r| r.fk_attribute_id == Some(attribute_id))
        {
            relation.fk_column.clone_from(&name);
        }
    }

    /// Remove an attribute by id, keeping the order of the rest
    pub fn delete_attribute(&mut self, entity_id: EntityId, attribute_id: AttributeId) {
        if let Some(entity) = self.entity_mut(entity_id) {
            entity.remove_attribute(attribute_id);
        }
    }

    /// Move the attribute at `from` to `to` within an entity
    ///
    /// Indices are positions, not ids. An out-of-range `from` is a no-op and
    /// returns `false`; a `to` past the end is clamped to the last slot.
    pub fn reorder_attributes(&mut self, entity_id: EntityId, from: usize, to: usize) -> bool {
        self.entity_mut(entity_id)
            .map(|e| e.move_attribute(from, to))
            .unwrap_or(false)
    }

    /// Get an attribute of an entity
    pub fn attribute(&self, entity_id: EntityId, attribute_id: AttributeId) -> Option<&Attribute> {
        self.entity(entity_id)?.attribute(attribute_id)
    }

    // ========================================================================
    // Relation Management
    // ========================================================================

    /// Add a relation
    ///
    /// No foreign-key column is created; use [`connect`](Self::connect) for that.
    pub fn add_relation(&mut self, template: RelationTemplate) -> &Relation {
        let relation = Relation::from_template(self.ids.next_id(), template);
        tracing::debug!(
            relation_id = relation.id,
            from = relation.from,
            to = relation.to,
            cardinality = %relation.cardinality,
            "added relation"
        );

        let index = self.relations.len();
        self.relations.push(relation);
        &self.relations[index]
    }

    /// Create a relation together with its foreign-key column
    ///
    /// The column is appended to the draft's FK target and the relation is
    /// linked to it by id. Returns `None` when either endpoint is unknown or
    /// the FK target is not one of the endpoints.
    pub fn connect(&mut self, draft: RelationDraft) -> Option<&Relation> {
        if self.entity(draft.from).is_none() || self.entity(draft.to).is_none() {
            tracing::warn!(from = draft.from, to = draft.to, "relation endpoint not found");
            return None;
        }
        if draft.fk_target_entity_id != draft.from && draft.fk_target_entity_id != draft.to {
            tracing::warn!(
                target = draft.fk_target_entity_id,
                "foreign key target is not an endpoint of the relation"
            );
            return None;
        }

        let referenced_name = self.entity_name(draft.referenced_entity_id()).to_string();
        let column_name = if draft.fk_column_name.is_empty() {
            fk::fk_column_name(&referenced_name)
        } else {
            draft.fk_column_name.clone()
        };
        let ref_table = if draft.ref_table.is_empty() {
            referenced_name
        } else {
            draft.ref_table.clone()
        };

        let attribute_id = self.ids.next_id();
        let attribute = fk::fk_attribute(attribute_id, &draft, &column_name, &ref_table);
        self.entity_mut(draft.fk_target_entity_id)?
            .attributes
            .push(attribute);

        let template = RelationTemplate::new(draft.from, draft.to, draft.cardinality)
            .with_label(draft.label)
            .with_fk(column_name, draft.fk_target_entity_id)
            .linked_to(attribute_id);
        Some(self.add_relation(template))
    }

    /// Remove a relation and its foreign-key column
    ///
    /// A relation linked to its column by id removes exactly that column.
    /// An unlinked relation removes every column on the FK target whose name
    /// equals `fk_column`.
    pub fn delete_relation(&mut self, id: RelationId) {
        let Some(index) = self.relations.iter().position(|r| r.id == id) else {
            return;
        };
        let relation = self.relations.remove(index);
        let removed = self.remove_fk_attribute(&relation);
        tracing::debug!(relation_id = id, removed_columns = removed, "deleted relation");
    }

    fn remove_fk_attribute(&mut self, relation: &Relation) -> usize {
        let Some(target) = relation
            .fk_target_entity_id
            .and_then(|target_id| self.entity_mut(target_id))
        else {
            return 0;
        };

        match relation.fk_attribute_id {
            Some(attribute_id) => target.remove_attribute(attribute_id).map_or(0, |_| 1),
            None if !relation.fk_column.is_empty() => {
                target.remove_attributes_named(&relation.fk_column)
            }
            None => 0,
        }
    }

    /// Get a relation by ID
    pub fn relation(&self, id: RelationId) -> Option<&Relation> {
        self.relations.iter().find(|r| r.id == id)
    }

    /// Relations where the entity is source or target, in creation order
    pub fn relations_for_entity(&self, entity_id: EntityId) -> Vec<&Relation> {
        self.relations
            .iter()
            .filter(|r| r.involves(entity_id))
            .collect()
    }

    /// All relations in creation order
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Get the number of relations
    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    /// Suggested foreign-key column name for references to an entity
    pub fn suggest_fk_column(&self, entity_id: EntityId) -> Option<String> {
        self.entity(entity_id).map(|e| fk::fk_column_name(&e.name))
    }

    // ========================================================================
    // Palette, Selection and Display
    // ========================================================================

    /// The entity type palette
    pub fn entity_types(&self) -> &[EntityType] {
        &self.entity_types
    }

    /// Look up a palette entry by tag
    pub fn entity_type(&self, tag: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|t| t.id == tag)
    }

    /// Select an entity, or clear the selection with `None`
    ///
    /// Selecting an unknown id clears the selection.
    pub fn select_entity(&mut self, id: Option<EntityId>) {
        self.selected_entity_id = id.filter(|&id| self.entity(id).is_some());
    }

    pub fn selected_entity_id(&self) -> Option<EntityId> {
        self.selected_entity_id
    }

    pub fn selected_entity(&self) -> Option<&Entity> {
        self.selected_entity_id.and_then(|id| self.entity(id))
    }

    pub fn show_badges(&self) -> bool {
        self.show_badges
    }

    pub fn set_show_badges(&mut self, show: bool) {
        self.show_badges = show;
    }

    /// Flip badge visibility
    pub fn toggle_badges(&mut self) {
        self.show_badges = !self.show_badges;
    }

    /// Clear all diagram data
    pub fn clear(&mut self) {
        self.entities.clear();
        self.relations.clear();
        self.selected_entity_id = None;
    }
}

impl Default for SchemaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Validatable for SchemaStore {
    fn validate(&self) -> ErdResult<()> {
        match self.validation_errors().into_iter().next() {
            Some(message) => Err(ErdError::validation(message)),
            None => Ok(()),
        }
    }

    /// Every problem found, in entity then relation order
    fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for entity in &self.entities {
            if let Err(e) = entity.validate() {
                errors.push(e.to_string());
            }
        }

        let mut names = std::collections::HashSet::new();
        for entity in &self.entities {
            if !names.insert(entity.name.as_str()) {
                errors.push(ErdError::DuplicateEntity(entity.name.clone()).to_string());
            }
        }

        for relation in &self.relations {
            for endpoint in [relation.from, relation.to] {
                if self.entity(endpoint).is_none() {
                    errors.push(
                        ErdError::RelationValidation(format!(
                            "relation {} references missing entity {}",
                            relation.id, endpoint
                        ))
                        .to_string(),
                    );
                }
            }

            if !Cardinality::is_well_formed(&relation.cardinality) {
                errors.push(
                    ErdError::RelationValidation(format!(
                        "relation {} has malformed cardinality '{}'",
                        relation.id, relation.cardinality
                    ))
                    .to_string(),
                );
            }

            if let Some(message) = self.missing_fk_column(relation) {
                errors.push(ErdError::RelationValidation(message).to_string());
            }
        }

        errors
    }
}

impl SchemaStore {
    fn missing_fk_column(&self, relation: &Relation) -> Option<String> {
        if !relation.has_fk_column() {
            return None;
        }
        let target = self.entity(relation.fk_target_entity_id?)?;
        let present = match relation.fk_attribute_id {
            Some(attribute_id) => target.attribute(attribute_id).is_some_and(|a| a.fk),
            None => target
                .attribute_by_name(&relation.fk_column)
                .is_some_and(|a| a.fk),
        };

        (!present).then(|| {
            format!(
                "relation {} expects foreign key column '{}' on '{}'",
                relation.id, relation.fk_column, target.name
            )
        })
    }
}

// ============================================================================
// SchemaSnapshot
// ============================================================================

/// Serialized form of a [`SchemaStore`]
///
/// The palette and the id counter are not stored; the counter is reseeded
/// above the highest id when a snapshot is turned back into a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    #[serde(default)]
    pub entities: Vec<Entity>,

    #[serde(default)]
    pub relations: Vec<Relation>,

    #[serde(default)]
    pub selected_entity_id: Option<EntityId>,

    #[serde(default = "default_show_badges")]
    pub show_badges: bool,
}

fn default_show_badges() -> bool {
    true
}

impl TryFrom<SchemaSnapshot> for SchemaStore {
    type Error = ErdError;

    fn try_from(snapshot: SchemaSnapshot) -> ErdResult<Self> {
        let mut store = SchemaStore::from_parts(snapshot.entities, snapshot.relations)?;
        store.select_entity(snapshot.selected_entity_id);
        store.show_badges = snapshot.show_badges;
        Ok(store)
    }
}

impl From<SchemaStore> for SchemaSnapshot {
    fn from(store: SchemaStore) -> Self {
        Self {
            entities: store.entities,
            relations: store.relations,
            selected_entity_id: store.selected_entity_id,
            show_badges: store.show_badges,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn attribute_names(store: &SchemaStore, entity_id: EntityId) -> Vec<String> {
        store
            .entity(entity_id)
            .map(|e| e.attributes.iter().map(|a| a.name.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_add_entity_seeds_primary_key() {
        let mut store = SchemaStore::new();
        let entity = store.add_entity(EntityTemplate::new("User").at(10.0, 20.0));

        assert_eq!(entity.name, "User");
        assert_eq!(entity.attributes.len(), 1);
        let key = &entity.attributes[0];
        assert_eq!(key.name, "id");
        assert_eq!(key.data_type, "INT");
        assert!(key.pk && key.nn && key.unsigned && key.auto_increment);
        assert_ne!(key.id, entity.id);
    }

    #[test]
    fn test_duplicate_names_are_accepted() {
        let mut store = SchemaStore::new();
        let a = store.add_entity(EntityTemplate::new("User")).id;
        let b = store.add_entity(EntityTemplate::new("User")).id;
        assert_ne!(a, b);
        assert_eq!(store.entity_count(), 2);
        assert!(!store.is_valid());
    }

    #[test]
    fn test_ids_are_unique_across_kinds() {
        let mut store = SchemaStore::new();
        let mut seen = HashSet::new();

        for i in 0..5 {
            let entity = store.add_entity(EntityTemplate::new(format!("T{i}")));
            assert!(seen.insert(entity.id));
            assert!(seen.insert(entity.attributes[0].id));
            let entity_id = entity.id;

            let attribute_id = store.add_attribute(entity_id).map(|a| a.id);
            assert!(seen.insert(attribute_id.unwrap()));

            let relation_id = store.add_relation(RelationTemplate::new(entity_id, entity_id, "1:1")).id;
            assert!(seen.insert(relation_id));
        }
    }

    #[test]
    fn test_update_entity_missing_is_noop() {
        let mut store = SchemaStore::new();
        let id = store.add_entity(EntityTemplate::new("User")).id;
        store.update_entity(999, EntityPatch::new().name("Ghost"));
        store.update_entity(id, EntityPatch::new().description("accounts"));

        assert_eq!(store.entity(id).unwrap().description, "accounts");
        assert!(store.entity_by_name("Ghost").is_none());
    }

    #[test]
    fn test_move_entity_clamps() {
        let mut store = SchemaStore::new();
        let id = store.add_entity(EntityTemplate::new("User")).id;
        store.move_entity(id, Position::new(-40.0, 15.0));
        assert_eq!(store.entity(id).unwrap().position, Position::new(0.0, 15.0));
    }

    #[test]
    fn test_delete_entity_cascades_relations() {
        let mut store = SchemaStore::new();
        let a = store.add_entity(EntityTemplate::new("A")).id;
        let b = store.add_entity(EntityTemplate::new("B")).id;
        let c = store.add_entity(EntityTemplate::new("C")).id;
        let ab = store.add_relation(RelationTemplate::new(a, b, "1:N")).id;
        let ca = store.add_relation(RelationTemplate::new(c, a, "1:N")).id;
        let bc = store.add_relation(RelationTemplate::new(b, c, "1:1")).id;

        store.select_entity(Some(a));
        store.delete_entity(a);

        assert!(store.entity(a).is_none());
        assert!(store.relation(ab).is_none());
        assert!(store.relation(ca).is_none());
        assert!(store.relation(bc).is_some());
        assert_eq!(store.relation_count(), 1);
        assert_eq!(store.selected_entity_id(), None);
    }

    #[test]
    fn test_delete_entity_keeps_unrelated_selection() {
        let mut store = SchemaStore::new();
        let a = store.add_entity(EntityTemplate::new("A")).id;
        let b = store.add_entity(EntityTemplate::new("B")).id;
        store.select_entity(Some(b));
        store.delete_entity(a);
        assert_eq!(store.selected_entity_id(), Some(b));

        store.delete_entity(12345);
        assert_eq!(store.entity_count(), 1);
    }

    #[test]
    fn test_delete_entity_removes_cascaded_fk_columns() {
        let mut store = SchemaStore::new();
        let user = store.add_entity(EntityTemplate::new("User")).id;
        let post = store.add_entity(EntityTemplate::new("Post")).id;
        store.connect(RelationDraft::new(user, post, "1:N"));
        assert_eq!(attribute_names(&store, post), vec!["id", "user_id"]);

        store.delete_entity(user);
        assert_eq!(attribute_names(&store, post), vec!["id"]);
    }

    #[test]
    fn test_add_attribute_defaults() {
        let mut store = SchemaStore::new();
        let id = store.add_entity(EntityTemplate::new("User")).id;
        let attribute = store.add_attribute(id).cloned().unwrap();

        assert_eq!(attribute.name, "new_col");
        assert_eq!(attribute.data_type, "VARCHAR");
        assert_eq!(attribute.length, "255");
        assert!(!attribute.pk && !attribute.fk && !attribute.nn);
        assert_eq!(attribute_names(&store, id), vec!["id", "new_col"]);
        assert!(store.add_attribute(999).is_none());
    }

    #[test]
    fn test_update_and_delete_attribute() {
        let mut store = SchemaStore::new();
        let id = store.add_entity(EntityTemplate::new("User")).id;
        let a = store.add_attribute(id).unwrap().id;
        let b = store.add_attribute(id).unwrap().id;

        store.update_attribute(id, a, AttributePatch::new().name("email").nn(true));
        store.update_attribute(id, 999, AttributePatch::new().name("ghost"));
        store.update_attribute(999, a, AttributePatch::new().name("ghost"));
        assert_eq!(attribute_names(&store, id), vec!["id", "email", "new_col"]);
        assert!(store.attribute(id, a).unwrap().nn);

        store.delete_attribute(id, a);
        assert_eq!(attribute_names(&store, id), vec!["id", "new_col"]);
        assert_eq!(store.attribute(id, b).map(|a| a.id), Some(b));
    }

    #[test]
    fn test_reorder_attributes() {
        let mut store = SchemaStore::new();
        let id = store.add_entity(EntityTemplate::new("T")).id;
        for name in ["b", "c", "d"] {
            let attribute_id = store.add_attribute(id).unwrap().id;
            store.update_attribute(id, attribute_id, AttributePatch::new().name(name));
        }
        let key_id = store.entity(id).unwrap().attributes[0].id;
        store.update_attribute(id, key_id, AttributePatch::new().name("a"));
        let before: HashSet<AttributeId> = store.entity(id).unwrap().attribute_ids().into_iter().collect();

        assert!(store.reorder_attributes(id, 0, 2));
        assert_eq!(attribute_names(&store, id), vec!["b", "c", "a", "d"]);

        let after: HashSet<AttributeId> = store.entity(id).unwrap().attribute_ids().into_iter().collect();
        assert_eq!(before, after);

        assert!(!store.reorder_attributes(id, 10, 0));
        assert!(!store.reorder_attributes(999, 0, 1));
        assert_eq!(attribute_names(&store, id), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_delete_unlinked_relation_removes_by_name() {
        let mut store = SchemaStore::new();
        let user = store.add_entity(EntityTemplate::new("User")).id;
        let post = store.add_entity(EntityTemplate::new("Post")).id;

        for target in [user, post, post] {
            let attribute_id = store.add_attribute(target).unwrap().id;
            store.update_attribute(
                target,
                attribute_id,
                AttributePatch::new().name("user_id").fk(true),
            );
        }

        let relation = store
            .add_relation(RelationTemplate::new(user, post, "1:N").with_fk("user_id", post))
            .id;
        store.delete_relation(relation);

        assert!(store.relation(relation).is_none());
        assert_eq!(attribute_names(&store, post), vec!["id"]);
        assert_eq!(attribute_names(&store, user), vec!["id", "user_id"]);
    }

    #[test]
    fn test_delete_linked_relation_removes_by_id() {
        let mut store = SchemaStore::new();
        let user = store.add_entity(EntityTemplate::new("User")).id;
        let post = store.add_entity(EntityTemplate::new("Post")).id;
        let relation = store.connect(RelationDraft::new(user, post, "1:N")).unwrap().id;

        // unrelated column that happens to share the name
        let twin = store.add_attribute(post).unwrap().id;
        store.update_attribute(post, twin, AttributePatch::new().name("user_id"));

        store.delete_relation(relation);
        assert_eq!(attribute_names(&store, post), vec!["id", "user_id"]);
        assert_eq!(store.entity(post).unwrap().attributes[1].id, twin);
    }

    #[test]
    fn test_delete_relation_missing_is_noop() {
        let mut store = SchemaStore::new();
        let a = store.add_entity(EntityTemplate::new("A")).id;
        store.add_relation(RelationTemplate::new(a, a, "1:1"));
        store.delete_relation(999);
        assert_eq!(store.relation_count(), 1);
    }

    #[test]
    fn test_connect_creates_linked_fk_column() {
        let mut store = SchemaStore::new();
        let user = store.add_entity(EntityTemplate::new("BlogUser")).id;
        let post = store.add_entity(EntityTemplate::new("Post")).id;

        let relation = store
            .connect(RelationDraft::new(user, post, "1:N").with_label("writes"))
            .cloned()
            .unwrap();

        assert_eq!(relation.fk_column, "blog_user_id");
        assert_eq!(relation.fk_target_entity_id, Some(post));
        assert_eq!(relation.label, "writes");

        let column = store
            .attribute(post, relation.fk_attribute_id.unwrap())
            .unwrap();
        assert_eq!(column.name, "blog_user_id");
        assert!(column.fk && column.nn && column.unsigned);
        assert_eq!(column.fk_ref.table, "BlogUser");
        assert_eq!(column.fk_ref.column, "id");
        assert!(store.is_valid());
    }

    #[test]
    fn test_connect_rejects_unknown_endpoints() {
        let mut store = SchemaStore::new();
        let user = store.add_entity(EntityTemplate::new("User")).id;
        assert!(store.connect(RelationDraft::new(user, 77, "1:N")).is_none());

        let post = store.add_entity(EntityTemplate::new("Post")).id;
        let mut draft = RelationDraft::new(user, post, "1:N");
        draft.fk_target_entity_id = 77;
        assert!(store.connect(draft).is_none());
        assert_eq!(store.relation_count(), 0);
    }

    #[test]
    fn test_renaming_linked_column_updates_relation() {
        let mut store = SchemaStore::new();
        let user = store.add_entity(EntityTemplate::new("User")).id;
        let post = store.add_entity(EntityTemplate::new("Post")).id;
        let relation = store.connect(RelationDraft::new(user, post, "1:N")).cloned().unwrap();

        store.update_attribute(
            post,
            relation.fk_attribute_id.unwrap(),
            AttributePatch::new().name("author_id"),
        );
        assert_eq!(store.relation(relation.id).unwrap().fk_column, "author_id");
    }

    #[test]
    fn test_lookups_degrade_to_empty() {
        let mut store = SchemaStore::new();
        let user = store.add_entity(EntityTemplate::new("User")).id;
        let post = store.add_entity(EntityTemplate::new("Post")).id;
        let tag = store.add_entity(EntityTemplate::new("Tag")).id;
        let first = store.add_relation(RelationTemplate::new(user, post, "1:N")).id;
        let second = store.add_relation(RelationTemplate::new(tag, user, "N:M")).id;
        store.add_relation(RelationTemplate::new(post, tag, "N:M"));

        assert_eq!(store.entity_name(user), "User");
        assert_eq!(store.entity_name(404), "");
        assert!(store.entity(404).is_none());
        assert!(store.relations_for_entity(404).is_empty());

        let ids: Vec<RelationId> = store.relations_for_entity(user).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_selection_and_badges() {
        let mut store = SchemaStore::new();
        let id = store.add_entity(EntityTemplate::new("User")).id;

        store.select_entity(Some(id));
        assert_eq!(store.selected_entity().map(|e| e.id), Some(id));
        store.select_entity(Some(999));
        assert_eq!(store.selected_entity_id(), None);

        assert!(store.show_badges());
        store.toggle_badges();
        assert!(!store.show_badges());
    }

    #[test]
    fn test_palette_lookup() {
        let store = SchemaStore::new();
        assert_eq!(store.entity_types().len(), 8);
        assert_eq!(store.entity_type("log").map(|t| t.color.as_str()), Some("#64748b"));
        assert!(store.entity_type("unknown").is_none());
    }

    #[test]
    fn test_from_parts_seeds_ids_above_existing() {
        let mut entity = Entity::from_template(3, 40, EntityTemplate::new("User"));
        entity.attributes.push(Attribute::new(41, "email", "VARCHAR"));
        let relation = Relation::from_template(12, RelationTemplate::new(3, 3, "1:1"));

        let mut store = SchemaStore::from_parts(vec![entity], vec![relation]).unwrap();
        assert_eq!(store.next_id(), 42);
    }

    #[test]
    fn test_from_parts_rejects_max_id() {
        let entity = Entity::from_template(u64::MAX, 1, EntityTemplate::new("User"));
        let result = SchemaStore::from_parts(vec![entity], Vec::new());
        assert!(matches!(result, Err(ErdError::InvalidSchemaFormat(_))));
    }

    #[test]
    fn test_validation_reports_every_problem() {
        let mut store = SchemaStore::new();
        let user = store.add_entity(EntityTemplate::new("User")).id;
        store.add_entity(EntityTemplate::new("User"));
        let dangling = store.add_attribute(user).unwrap().id;
        store.update_attribute(user, dangling, AttributePatch::new().name("org_id").fk(true));
        store.add_relation(RelationTemplate::new(user, 404, "1:X").with_fk("user_id", user));

        let errors = store.validation_errors();
        assert_eq!(errors.len(), 5, "{errors:#?}");
        assert!(errors[0].contains("org_id"));
        assert!(errors[1].contains("Duplicate entity name"));
        assert!(errors[2].contains("missing entity 404"));
        assert!(errors[3].contains("malformed cardinality"));
        assert!(errors[4].contains("user_id"));
        assert!(store.validate().is_err());
    }
}
