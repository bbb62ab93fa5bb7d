//! Pointer drag for entity cards
//!
//! The offset between the pointer and the card's top-left corner is captured
//! on press so the card does not jump to the pointer. Moves are written
//! through [`SchemaStore::move_entity`], which keeps both coordinates
//! non-negative.

use erd_core::{EntityId, Position};
use erd_ir::SchemaStore;

/// State for dragging entities
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EntityDrag {
    /// The entity being dragged (if any)
    entity_id: Option<EntityId>,
    /// Offset from entity position to pointer position
    offset: Position,
}

impl EntityDrag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging an entity from a pointer position in canvas coordinates
    ///
    /// Returns `false` when the entity does not exist.
    pub fn start(&mut self, store: &SchemaStore, entity_id: EntityId, pointer: Position) -> bool {
        let Some(entity) = store.entity(entity_id) else {
            return false;
        };
        self.entity_id = Some(entity_id);
        self.offset = pointer - entity.position;
        true
    }

    /// Move the dragged entity under the pointer
    ///
    /// Returns the position written to the store, or `None` when idle.
    pub fn update(&self, store: &mut SchemaStore, pointer: Position) -> Option<Position> {
        let entity_id = self.entity_id?;
        store.move_entity(entity_id, pointer - self.offset);
        store.entity(entity_id).map(|e| e.position)
    }

    /// Stop dragging
    pub fn stop(&mut self) {
        *self = Self::default();
    }

    pub fn is_dragging(&self) -> bool {
        self.entity_id.is_some()
    }

    pub fn dragged_entity(&self) -> Option<EntityId> {
        self.entity_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use erd_ir::EntityTemplate;

    #[test]
    fn test_drag_keeps_pointer_offset() {
        let mut store = SchemaStore::new();
        let id = store.add_entity(EntityTemplate::new("User").at(100.0, 100.0)).id;
        let mut drag = EntityDrag::new();

        assert!(drag.start(&store, id, Position::new(110.0, 120.0)));
        assert_eq!(drag.dragged_entity(), Some(id));

        let moved = drag.update(&mut store, Position::new(200.0, 200.0));
        assert_eq!(moved, Some(Position::new(190.0, 180.0)));

        drag.stop();
        assert!(!drag.is_dragging());
        assert_eq!(drag.update(&mut store, Position::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_drag_clamps_to_canvas() {
        let mut store = SchemaStore::new();
        let id = store.add_entity(EntityTemplate::new("User").at(20.0, 20.0)).id;
        let mut drag = EntityDrag::new();

        drag.start(&store, id, Position::new(30.0, 30.0));
        let moved = drag.update(&mut store, Position::new(5.0, 60.0));
        assert_eq!(moved, Some(Position::new(0.0, 50.0)));
    }

    #[test]
    fn test_start_on_missing_entity() {
        let store = SchemaStore::new();
        let mut drag = EntityDrag::new();
        assert!(!drag.start(&store, 1, Position::zero()));
        assert!(!drag.is_dragging());
    }
}
