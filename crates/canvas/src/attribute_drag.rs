//! Drag-to-reorder for attribute rows
//!
//! Reordering is live: every time the pointer crosses onto a different row of
//! the source entity, the store moves the dragged attribute there, so the
//! committed order doubles as the drag preview. Dropping and cancelling both
//! end with [`AttributeDrag::end`].

use erd_core::{AttributeId, EntityId};
use erd_ir::SchemaStore;

/// State of an attribute drag gesture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttributeDrag {
    #[default]
    Idle,
    Dragging {
        source_entity_id: EntityId,
        dragged_attribute_id: AttributeId,
        /// Where the dragged attribute currently sits in the source entity
        current_index: usize,
    },
}

impl AttributeDrag {
    pub fn new() -> Self {
        Self::Idle
    }

    /// Pick up the attribute at `index` of an entity
    ///
    /// Replaces any gesture still captured from a drag whose end was never
    /// delivered. An unresolved entity or index leaves the drag idle.
    pub fn start(&mut self, store: &SchemaStore, entity_id: EntityId, index: usize) {
        let Some(attribute) = store
            .entity(entity_id)
            .and_then(|e| e.attributes.get(index))
        else {
            *self = AttributeDrag::Idle;
            return;
        };

        *self = AttributeDrag::Dragging {
            source_entity_id: entity_id,
            dragged_attribute_id: attribute.id,
            current_index: index,
        };
    }

    /// Pointer is over row `index` of an entity
    ///
    /// Rows of other entities are ignored. Returns whether the store changed.
    pub fn over(&mut self, store: &mut SchemaStore, entity_id: EntityId, index: usize) -> bool {
        let AttributeDrag::Dragging {
            source_entity_id,
            current_index,
            ..
        } = self
        else {
            return false;
        };
        if *source_entity_id != entity_id || *current_index == index {
            return false;
        }

        if !store.reorder_attributes(entity_id, *current_index, index) {
            return false;
        }
        tracing::trace!(entity_id, from = *current_index, to = index, "attribute moved");

        // the store clamps targets past the end
        let last = store
            .entity(entity_id)
            .map_or(0, |e| e.attribute_count().saturating_sub(1));
        *current_index = index.min(last);
        true
    }

    /// Drop or cancel; always returns to idle
    pub fn end(&mut self) {
        *self = AttributeDrag::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, AttributeDrag::Dragging { .. })
    }

    /// Attribute being dragged, if any
    pub fn dragged_attribute_id(&self) -> Option<AttributeId> {
        match self {
            AttributeDrag::Dragging {
                dragged_attribute_id,
                ..
            } => Some(*dragged_attribute_id),
            AttributeDrag::Idle => None,
        }
    }

    /// Entity the drag started in, if any
    pub fn source_entity_id(&self) -> Option<EntityId> {
        match self {
            AttributeDrag::Dragging {
                source_entity_id, ..
            } => Some(*source_entity_id),
            AttributeDrag::Idle => None,
        }
    }
}
